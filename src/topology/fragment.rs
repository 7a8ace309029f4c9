use super::error::{Result, TopologyError};
use super::types::{FragmentId, Location};
use crate::membership::ProcessId;
use serde::{Deserialize, Serialize};

/// A shard of one frame/slice and the process that serves it, if any.
///
/// Values handed out by the topology are snapshots; the authoritative copy lives
/// inside its `FrameSliceIntersect`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fragment {
    id: FragmentId,
    process: Option<ProcessId>,
}

impl Fragment {
    pub fn new(id: FragmentId) -> Self {
        Self { id, process: None }
    }

    pub fn id(&self) -> FragmentId {
        self.id
    }

    pub fn process_id(&self) -> Option<ProcessId> {
        self.process
    }

    pub fn is_assigned(&self) -> bool {
        self.process.is_some()
    }

    /// Moves the fragment from unassigned to assigned.
    ///
    /// Assigning the current owner again is accepted; any other process is
    /// rejected since fragments are never migrated.
    pub(crate) fn set_process(&mut self, process: ProcessId) -> Result<()> {
        match self.process {
            None => {
                self.process = Some(process);
                Ok(())
            }
            Some(current) if current == process => Ok(()),
            Some(current) => Err(TopologyError::FragmentAlreadyAssigned {
                fragment: self.id,
                process: current,
            }),
        }
    }

    pub fn location(&self) -> Option<Location> {
        self.process.map(|process_id| Location {
            process_id,
            fragment_id: self.id,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn assignment_is_one_shot() {
        let mut fragment = Fragment::new(FragmentId(1));
        let owner = ProcessId::new();
        let other = ProcessId::new();

        assert!(!fragment.is_assigned());
        assert_eq!(fragment.location(), None);

        fragment.set_process(owner).unwrap();
        fragment.set_process(owner).unwrap();
        assert_eq!(
            fragment.set_process(other),
            Err(TopologyError::FragmentAlreadyAssigned {
                fragment: FragmentId(1),
                process: owner,
            })
        );

        assert_eq!(fragment.process_id(), Some(owner));
        assert_eq!(
            fragment.location(),
            Some(Location {
                process_id: owner,
                fragment_id: FragmentId(1),
            })
        );
    }
}
