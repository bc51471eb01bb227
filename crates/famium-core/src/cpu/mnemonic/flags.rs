use crate::cpu::{Cpu, status::Status};

impl Cpu {
    pub(crate) fn clc(&mut self) {
        self.p.remove(Status::CARRY);
    }

    pub(crate) fn cld(&mut self) {
        self.p.remove(Status::DECIMAL);
    }

    pub(crate) fn cli(&mut self) {
        self.p.remove(Status::INTERRUPT);
    }

    pub(crate) fn clv(&mut self) {
        self.p.remove(Status::OVERFLOW);
    }

    pub(crate) fn sec(&mut self) {
        self.p.insert(Status::CARRY);
    }

    pub(crate) fn sed(&mut self) {
        self.p.insert(Status::DECIMAL);
    }

    pub(crate) fn sei(&mut self) {
        self.p.insert(Status::INTERRUPT);
    }
}
