//! Partition shared entries by the container that owns them.

use crate::domain::service::SharedEntry;

/// Shared entries owned by one container.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContainerGroup<'a> {
    pub container_id: &'a str,
    pub entries: Vec<&'a SharedEntry>,
}

/// Group `entries` by owning container.
///
/// Entries without a container id belong to `default_container`. Groups are
/// returned in first-seen order and keep the input order of their entries;
/// every entry lands in exactly one group.
pub fn group_by_container<'a>(
    entries: &'a [SharedEntry],
    default_container: &'a str,
) -> Vec<ContainerGroup<'a>> {
    let mut groups: Vec<ContainerGroup<'a>> = Vec::new();
    for entry in entries {
        let owner = entry.owner(default_container);
        match groups.iter_mut().find(|group| group.container_id == owner) {
            Some(group) => group.entries.push(entry),
            None => groups.push(ContainerGroup { container_id: owner, entries: vec![entry] }),
        }
    }
    groups
}
