//
// Copyright (c) The Holo Core Contributors
//
// SPDX-License-Identifier: MIT
//

use std::collections::BTreeSet;

use derive_new::new;
use serde::{Deserialize, Serialize};

use crate::debug::Debug;
use crate::error::Error;

// Index block layout: `lanes` consecutive indices for each of `ports` ports,
// the first port starting at `base` and each next one `stride` further.
#[derive(Clone, Copy, Debug, Eq, PartialEq, new)]
#[derive(Deserialize, Serialize)]
pub struct StridePolicy {
    pub base: u32,
    pub stride: u32,
    pub ports: u32,
    pub lanes: u32,
}

// Logical channel index allocator.
//
// Indices handed out or reserved are never released: one allocator covers
// the whole lifetime of a graph build.
#[derive(Clone, Debug, Default)]
pub struct IndexAllocator {
    allocated: BTreeSet<u32>,
}

// ===== impl StridePolicy =====

impl StridePolicy {
    pub fn count(&self) -> u64 {
        u64::from(self.ports) * u64::from(self.lanes)
    }

    // Returns the indices described by this policy, in port-major order.
    fn indices(&self) -> impl Iterator<Item = u64> + '_ {
        (0..self.ports).flat_map(move |port| {
            (0..self.lanes).map(move |lane| {
                u64::from(self.base)
                    + u64::from(port) * u64::from(self.stride)
                    + u64::from(lane)
            })
        })
    }
}

// ===== impl IndexAllocator =====

impl IndexAllocator {
    // Allocates a block of indices. Either the whole block is allocated or,
    // on error, nothing is.
    pub fn allocate(
        &mut self,
        policy: &StridePolicy,
    ) -> Result<Vec<u32>, Error> {
        let mut block = BTreeSet::new();
        let mut indices = vec![];
        for index in policy.indices() {
            let index = u32::try_from(index)
                .ok()
                .filter(|index| *index != 0)
                .ok_or(Error::InvalidIndex(index))?;
            if self.allocated.contains(&index) || !block.insert(index) {
                return Err(Error::IndexCollision(index));
            }
            indices.push(index);
        }
        self.allocated.append(&mut block);

        Debug::IndicesAllocated(policy, &indices).log();

        Ok(indices)
    }

    // Reserves a caller-supplied index.
    pub fn reserve(&mut self, index: u32) -> Result<(), Error> {
        if index == 0 {
            return Err(Error::InvalidIndex(0));
        }
        if !self.allocated.insert(index) {
            return Err(Error::IndexCollision(index));
        }

        Debug::IndexReserved(index).log();

        Ok(())
    }

    pub fn contains(&self, index: u32) -> bool {
        self.allocated.contains(&index)
    }

    pub fn len(&self) -> usize {
        self.allocated.len()
    }

    pub fn is_empty(&self) -> bool {
        self.allocated.is_empty()
    }

    // Iterates over all indices taken so far, in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = u32> + '_ {
        self.allocated.iter().copied()
    }
}
