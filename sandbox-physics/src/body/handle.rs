// Copyright 2025 John Brosnihan
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
//! Body handles
//!
//! Handles are lightweight, copyable references to bodies owned by a
//! [`World`](crate::World). Bodies are never removed during a simulation, so a
//! handle is simply the body's insertion index.

use std::fmt;

/// Stable reference to a body registered with a world
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BodyHandle(usize);

impl BodyHandle {
    /// Create a handle from a raw insertion index
    pub fn new(index: usize) -> Self {
        BodyHandle(index)
    }

    /// Get the raw insertion index
    pub fn index(&self) -> usize {
        self.0
    }
}

impl fmt::Display for BodyHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Body({})", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_handle_index() {
        let handle = BodyHandle::new(42);
        assert_eq!(handle.index(), 42);
    }

    #[test]
    fn test_handle_ordering_follows_insertion() {
        let first = BodyHandle::new(0);
        let second = BodyHandle::new(1);
        assert!(first < second);
        assert_eq!(format!("{}", second), "Body(1)");
    }
}
