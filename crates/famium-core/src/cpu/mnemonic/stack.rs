use crate::{
    bus::Bus,
    cpu::{Cpu, status::Status},
    error::Result,
};

impl Cpu {
    // ================================================================
    //  PHA - Push Accumulator
    // ================================================================
    pub(crate) fn pha(&mut self, bus: &mut impl Bus) {
        self.push(bus, self.a);
    }

    // ================================================================
    //  PHP - Push Processor Status
    // ================================================================
    /// Sets B in P, then pushes P.
    pub(crate) fn php(&mut self, bus: &mut impl Bus) {
        self.p.insert(Status::BREAK);
        self.push(bus, self.p.bits());
    }

    // ================================================================
    //  PLA - Pull Accumulator
    // ================================================================
    /// A ← pop. Flags: N, Z.
    pub(crate) fn pla(&mut self, bus: &mut impl Bus) -> Result<()> {
        self.a = self.pop(bus)?;
        self.p.set_zn(self.a);
        Ok(())
    }

    // ================================================================
    //  PLP - Pull Processor Status
    // ================================================================
    pub(crate) fn plp(&mut self, bus: &mut impl Bus) -> Result<()> {
        self.p = Status::from_pulled(self.pop(bus)?);
        Ok(())
    }
}
