//! Procedural layout of the brick tower.
//!
//! A tower is a stack of layers with [`BRICKS_PER_LAYER`] bricks each. Bricks in a
//! layer lie side by side, touching along their depth, and every other layer is
//! turned by 90 degrees around the vertical axis. Layer `n` rests at
//! `brick_height * (n + 0.5)`, so layer 0 sits directly on a ground whose top face
//! is at `y = 0`.
//!
//! The layout is fully deterministic: the same [`TowerLayout`] always yields the same
//! bricks in the same order.

use bon::Builder;
use nalgebra::{Isometry3, Translation3, UnitQuaternion, Vector3};
use std::f32::consts::FRAC_PI_2;
use std::iter::FusedIterator;

pub const BRICKS_PER_LAYER: u32 = 3;

/// Paint categories a brick can be given.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum BrickColor {
    Green,
    Orange,
    Yellow,
    Teal,
    Red,
}

impl BrickColor {
    pub const PALETTE: [BrickColor; 5] = [
        BrickColor::Green,
        BrickColor::Orange,
        BrickColor::Yellow,
        BrickColor::Teal,
        BrickColor::Red,
    ];

    pub const fn hex(self) -> u32 {
        match self {
            BrickColor::Green => 0x23BD23,
            BrickColor::Orange => 0xED832B,
            BrickColor::Yellow => 0xEDDE2B,
            BrickColor::Teal => 0x1A8E8E,
            BrickColor::Red => 0xED2B2B,
        }
    }

    pub fn from_index(index: usize) -> Self {
        Self::PALETTE[index % Self::PALETTE.len()]
    }
}

/// Everything needed to create one brick.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Brick {
    pub layer: u32,
    pub slot: u32,
    /// Box size as (length, height, depth) in the brick's local frame.
    pub extent: Vector3<f32>,
    pub mass: f32,
    pub pose: Isometry3<f32>,
    pub color: BrickColor,
}

impl Brick {
    /// World axis along which the bricks of this brick's layer are lined up.
    pub fn placement_axis(&self) -> Vector3<f32> {
        self.pose.rotation * Vector3::z()
    }

    /// World axis the brick's length runs along.
    pub fn length_axis(&self) -> Vector3<f32> {
        self.pose.rotation * Vector3::x()
    }
}

#[derive(Debug, Clone, PartialEq, Builder)]
pub struct TowerLayout {
    #[builder(default = 1.2)]
    pub brick_length: f32,
    #[builder(default = 0.3)]
    pub brick_height: f32,
    /// Three bricks side by side should span exactly one brick length.
    #[builder(default = 0.4)]
    pub brick_depth: f32,
    #[builder(default = 0.5)]
    pub brick_mass: f32,
    #[builder(default = 18)]
    pub layers: u32,
}

impl Default for TowerLayout {
    fn default() -> Self {
        TowerLayout::builder().build()
    }
}

impl TowerLayout {
    pub fn brick_extent(&self) -> Vector3<f32> {
        Vector3::new(self.brick_length, self.brick_height, self.brick_depth)
    }

    pub fn brick_count(&self) -> usize {
        self.layers as usize * BRICKS_PER_LAYER as usize
    }

    /// Height of the center of every brick in `layer`.
    pub fn layer_height(&self, layer: u32) -> f32 {
        self.brick_height * (layer as f32 + 0.5)
    }

    pub fn layer_rotation(&self, layer: u32) -> UnitQuaternion<f32> {
        if layer % 2 == 0 {
            UnitQuaternion::identity()
        } else {
            UnitQuaternion::from_axis_angle(&Vector3::y_axis(), FRAC_PI_2)
        }
    }

    pub fn brick(&self, layer: u32, slot: u32) -> Brick {
        let center_slot = (BRICKS_PER_LAYER - 1) as f32 / 2.0;
        let offset = (slot as f32 - center_slot) * self.brick_depth;
        let height = self.layer_height(layer);

        // even layers line up along z, odd ones along x
        let translation = if layer % 2 == 0 {
            Translation3::new(0.0, height, offset)
        } else {
            Translation3::new(offset, height, 0.0)
        };

        let index = (layer * BRICKS_PER_LAYER + slot) as usize;

        Brick {
            layer,
            slot,
            extent: self.brick_extent(),
            mass: self.brick_mass,
            pose: Isometry3::from_parts(translation, self.layer_rotation(layer)),
            color: BrickColor::from_index(index),
        }
    }

    /// Walks the tower bottom-up, layer by layer. Rebuilding a tower means asking for a
    /// fresh iterator.
    pub fn bricks(&self) -> TowerBricks {
        TowerBricks {
            layout: self.clone(),
            next: 0,
        }
    }
}

#[derive(Debug, Clone)]
pub struct TowerBricks {
    layout: TowerLayout,
    next: usize,
}

impl Iterator for TowerBricks {
    type Item = Brick;

    fn next(&mut self) -> Option<Brick> {
        if self.next >= self.layout.brick_count() {
            return None;
        }

        let per_layer = BRICKS_PER_LAYER as usize;
        let layer = (self.next / per_layer) as u32;
        let slot = (self.next % per_layer) as u32;
        self.next += 1;

        Some(self.layout.brick(layer, slot))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let left = self.layout.brick_count().saturating_sub(self.next);
        (left, Some(left))
    }
}

impl ExactSizeIterator for TowerBricks {}

impl FusedIterator for TowerBricks {}
