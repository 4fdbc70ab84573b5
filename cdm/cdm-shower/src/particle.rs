//! The event-record particle: species, momentum, ancestry, colour
//! slots and a write-once identity.

use cdm_core::{FourVector, Scalar};
use cdm_pdg::Species;

use crate::error::ShowerError;

/// Event-record status of a particle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Status {
    /// Incoming to the hard process.
    Initial,
    /// Internal to the hard process.
    Intermediate,
    /// Part of the final state.
    Final,
}

/// A shower particle. The unique ID and the production scale are
/// write-once: the plain setters refuse a second write, and rewriting
/// takes the explicit `overwrite_*` escape hatch. Mother, child and
/// colour slots use 0 as the unset sentinel.
#[derive(Clone, Debug)]
pub struct Particle {
    species: Species,
    momentum: FourVector,
    status: Status,
    id: u32,
    mothers: [u32; 2],
    children: [u32; 2],
    colours: [u32; 2],
    produced_at: Option<Scalar>,
}

impl Particle {
    pub fn new(species: Species, momentum: FourVector, status: Status) -> Particle {
        Particle {
            species,
            momentum,
            status,
            id: 0,
            mothers: [0, 0],
            children: [0, 0],
            colours: [0, 0],
            produced_at: None,
        }
    }

    #[inline]
    pub fn species(&self) -> Species {
        self.species
    }

    #[inline]
    pub fn pdg_code(&self) -> i32 {
        self.species.pdg_code()
    }

    #[inline]
    pub fn momentum(&self) -> FourVector {
        self.momentum
    }

    #[inline]
    pub fn set_momentum(&mut self, momentum: FourVector) {
        self.momentum = momentum;
    }

    #[inline]
    pub fn energy(&self) -> Scalar {
        self.momentum.e
    }

    #[inline]
    pub fn status(&self) -> Status {
        self.status
    }

    #[inline]
    pub fn set_status(&mut self, status: Status) {
        self.status = status;
    }

    /// Unique ID; 0 until assigned.
    #[inline]
    pub fn id(&self) -> u32 {
        self.id
    }

    pub fn set_id(&mut self, id: u32) -> Result<(), ShowerError> {
        if self.id != 0 {
            return Err(ShowerError::IdAlreadySet { id: self.id });
        }
        self.id = id;
        Ok(())
    }

    pub fn overwrite_id(&mut self, id: u32) {
        self.id = id;
    }

    /// The pt2 at which this particle entered the event, if it was
    /// produced by the shower.
    #[inline]
    pub fn produced_at(&self) -> Option<Scalar> {
        self.produced_at
    }

    pub fn set_produced_at(&mut self, pt2: Scalar) -> Result<(), ShowerError> {
        if self.produced_at.is_some() {
            return Err(ShowerError::ProducedAtAlreadySet { id: self.id });
        }
        self.produced_at = Some(pt2);
        Ok(())
    }

    pub fn overwrite_produced_at(&mut self, pt2: Scalar) {
        self.produced_at = Some(pt2);
    }

    #[inline]
    pub fn mothers(&self) -> [u32; 2] {
        self.mothers
    }

    #[inline]
    pub fn set_mother(&mut self, slot: usize, id: u32) {
        self.mothers[slot] = id;
    }

    #[inline]
    pub fn children(&self) -> [u32; 2] {
        self.children
    }

    #[inline]
    pub fn set_child(&mut self, slot: usize, id: u32) {
        self.children[slot] = id;
    }

    /// Record a child only if the slot is still free.
    #[inline]
    pub fn set_child_if_unset(&mut self, slot: usize, id: u32) {
        if self.children[slot] == 0 {
            self.children[slot] = id;
        }
    }

    /// Copy ancestry (mothers and children) from another particle, for
    /// a particle replacing it in the record.
    #[inline]
    pub fn inherit_history(&mut self, other: &Particle) {
        self.mothers = other.mothers;
        self.children = other.children;
    }

    /// Colour line; 0 when the slot is empty.
    #[inline]
    pub fn colour(&self) -> u32 {
        self.colours[0]
    }

    #[inline]
    pub fn anti_colour(&self) -> u32 {
        self.colours[1]
    }

    #[inline]
    pub fn colours(&self) -> [u32; 2] {
        self.colours
    }

    #[inline]
    pub fn set_colour(&mut self, line: u32) {
        self.colours[0] = line;
    }

    #[inline]
    pub fn set_anti_colour(&mut self, line: u32) {
        self.colours[1] = line;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cdm_pdg::Flavour;

    fn quark() -> Particle {
        Particle::new(
            Species::quark(Flavour::Up),
            FourVector::new(45.0, 0.0, 0.0, 45.0),
            Status::Final,
        )
    }

    #[test]
    fn unique_id_is_write_once() {
        let mut p = quark();
        p.set_id(7).unwrap();
        assert_eq!(p.set_id(8), Err(ShowerError::IdAlreadySet { id: 7 }));
        p.overwrite_id(8);
        assert_eq!(p.id(), 8);
    }

    #[test]
    fn production_scale_is_write_once() {
        let mut p = quark();
        p.set_produced_at(12.5).unwrap();
        assert!(p.set_produced_at(2.0).is_err());
        assert_eq!(p.produced_at(), Some(12.5));
    }

    #[test]
    fn child_slots_fill_only_when_free() {
        let mut p = quark();
        p.set_child_if_unset(0, 9);
        p.set_child_if_unset(0, 11);
        assert_eq!(p.children(), [9, 0]);
    }
}
