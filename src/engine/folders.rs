use std::collections::HashSet;

use serde::Serialize;
use thiserror::Error;

use crate::models::Folder;

/// Where a dragged folder lands relative to the drop target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropZone {
    Before,
    Inside,
    After,
}

/// Batch row sent to the server after a reorder: one `(id, position, parent)`
/// triple per sibling at the destination level.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PositionUpdate {
    pub id: i64,
    pub position: i64,
    pub parent_id: Option<i64>,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum MoveError {
    #[error("a folder cannot be moved into its own subtree")]
    WouldCycle,
    #[error("folder not found")]
    NotFound,
}

/// Map a pointer offset within the target row's bounding box to a drop zone:
/// top quartile inserts before, bottom quartile inserts after, the middle
/// half nests inside.
pub fn resolve_drop_zone(offset: u16, height: u16) -> DropZone {
    if height == 0 {
        return DropZone::Inside;
    }
    let offset = u32::from(offset.min(height - 1));
    let height = u32::from(height);
    if offset * 4 < height {
        DropZone::Before
    } else if offset * 4 >= height * 3 {
        DropZone::After
    } else {
        DropZone::Inside
    }
}

/// Direct children of `parent`, in sibling order.
pub fn children_of(folders: &[Folder], parent: Option<i64>) -> Vec<&Folder> {
    let mut children: Vec<&Folder> = folders
        .iter()
        .filter(|folder| folder.parent_id == parent)
        .collect();
    children.sort_by_key(|folder| (folder.position, folder.id));
    children
}

/// Ids in the subtree rooted at `root`, the root itself included. Including
/// the root makes the cycle guard also reject dropping a folder onto itself.
pub fn descendant_ids(folders: &[Folder], root: i64) -> HashSet<i64> {
    let mut result = HashSet::from([root]);
    let mut frontier = vec![root];
    while let Some(current) = frontier.pop() {
        for folder in folders {
            if folder.parent_id == Some(current) {
                if let Some(id) = folder.id {
                    if result.insert(id) {
                        frontier.push(id);
                    }
                }
            }
        }
    }
    result
}

/// Depth-first `(folder id, depth)` rows for the tree pane. Root folders are
/// always visible; a child row appears only when every ancestor is in the
/// expanded set.
pub fn visible_nodes(folders: &[Folder], expanded: &HashSet<i64>) -> Vec<(i64, usize)> {
    fn walk(
        folders: &[Folder],
        expanded: &HashSet<i64>,
        parent: Option<i64>,
        depth: usize,
        out: &mut Vec<(i64, usize)>,
    ) {
        for child in children_of(folders, parent) {
            let Some(id) = child.id else { continue };
            out.push((id, depth));
            if expanded.contains(&id) {
                walk(folders, expanded, Some(id), depth + 1, out);
            }
        }
    }

    let mut out = Vec::new();
    walk(folders, expanded, None, 0, &mut out);
    out
}

/// Plan moving `moved_id` relative to `target_id`. Rejects moves that would
/// make a folder its own ancestor, otherwise returns the renumbered
/// destination sibling list (contiguous positions from 0) for a single batch
/// update.
pub fn plan_move(
    folders: &[Folder],
    moved_id: i64,
    target_id: i64,
    zone: DropZone,
) -> Result<Vec<PositionUpdate>, MoveError> {
    if !folders.iter().any(|f| f.id == Some(moved_id)) {
        return Err(MoveError::NotFound);
    }
    let target = folders
        .iter()
        .find(|f| f.id == Some(target_id))
        .ok_or(MoveError::NotFound)?;

    if descendant_ids(folders, moved_id).contains(&target_id) {
        return Err(MoveError::WouldCycle);
    }

    let dest_parent = match zone {
        DropZone::Inside => Some(target_id),
        DropZone::Before | DropZone::After => target.parent_id,
    };

    // Destination sibling order with the moved folder taken out, then spliced
    // back in at the resolved index.
    let mut sibling_ids: Vec<i64> = children_of(folders, dest_parent)
        .iter()
        .filter_map(|f| f.id)
        .filter(|&id| id != moved_id)
        .collect();

    let insert_at = match zone {
        DropZone::Inside => sibling_ids.len(),
        DropZone::Before | DropZone::After => {
            let target_index = sibling_ids
                .iter()
                .position(|&id| id == target_id)
                .ok_or(MoveError::NotFound)?;
            if zone == DropZone::After {
                target_index + 1
            } else {
                target_index
            }
        }
    };
    sibling_ids.insert(insert_at, moved_id);

    Ok(sibling_ids
        .into_iter()
        .enumerate()
        .map(|(position, id)| PositionUpdate {
            id,
            position: position as i64,
            parent_id: dest_parent,
        })
        .collect())
}

/// Plan for deleting a folder: its direct children move up to the deleted
/// folder's parent (root when it had none) instead of cascading.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeletePlan {
    pub new_parent: Option<i64>,
    /// Renumbered sibling list at the new parent, surviving children included.
    pub reassignments: Vec<PositionUpdate>,
}

pub fn plan_delete(folders: &[Folder], deleted_id: i64) -> Result<DeletePlan, MoveError> {
    let deleted = folders
        .iter()
        .find(|f| f.id == Some(deleted_id))
        .ok_or(MoveError::NotFound)?;
    let new_parent = deleted.parent_id;

    let mut sibling_ids: Vec<i64> = children_of(folders, new_parent)
        .iter()
        .filter_map(|f| f.id)
        .filter(|&id| id != deleted_id)
        .collect();
    sibling_ids.extend(children_of(folders, Some(deleted_id)).iter().filter_map(|f| f.id));

    Ok(DeletePlan {
        new_parent,
        reassignments: sibling_ids
            .into_iter()
            .enumerate()
            .map(|(position, id)| PositionUpdate {
                id,
                position: position as i64,
                parent_id: new_parent,
            })
            .collect(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn folder(id: i64, name: &str, parent: Option<i64>, position: i64) -> Folder {
        Folder {
            id: Some(id),
            name: name.to_string(),
            parent_id: parent,
            position,
            has_children: false,
        }
    }

    /// A -> B -> C chain plus two root siblings of A.
    fn fixture() -> Vec<Folder> {
        vec![
            folder(1, "A", None, 0),
            folder(2, "B", Some(1), 0),
            folder(3, "C", Some(2), 0),
            folder(4, "D", None, 1),
            folder(5, "E", None, 2),
        ]
    }

    #[test]
    fn drop_zone_quartiles() {
        assert_eq!(resolve_drop_zone(0, 8), DropZone::Before);
        assert_eq!(resolve_drop_zone(1, 8), DropZone::Before);
        assert_eq!(resolve_drop_zone(2, 8), DropZone::Inside);
        assert_eq!(resolve_drop_zone(5, 8), DropZone::Inside);
        assert_eq!(resolve_drop_zone(6, 8), DropZone::After);
        assert_eq!(resolve_drop_zone(7, 8), DropZone::After);
    }

    #[test]
    fn cycle_guard_rejects_reparenting_into_own_subtree() {
        let folders = fixture();
        // A -> B -> C: making A a child of C would close the loop
        assert_eq!(
            plan_move(&folders, 1, 3, DropZone::Inside),
            Err(MoveError::WouldCycle)
        );
        // Dropping a folder onto itself is rejected too
        assert_eq!(
            plan_move(&folders, 1, 1, DropZone::Inside),
            Err(MoveError::WouldCycle)
        );
    }

    #[test]
    fn reorder_after_renumbers_the_whole_level() {
        let folders = fixture();
        // Move E between A and D
        let plan = plan_move(&folders, 5, 1, DropZone::After).unwrap();
        assert_eq!(
            plan,
            vec![
                PositionUpdate { id: 1, position: 0, parent_id: None },
                PositionUpdate { id: 5, position: 1, parent_id: None },
                PositionUpdate { id: 4, position: 2, parent_id: None },
            ]
        );
    }

    #[test]
    fn reorder_before_inserts_ahead_of_target() {
        let folders = fixture();
        let plan = plan_move(&folders, 5, 1, DropZone::Before).unwrap();
        let order: Vec<i64> = plan.iter().map(|row| row.id).collect();
        assert_eq!(order, vec![5, 1, 4]);
        let positions: Vec<i64> = plan.iter().map(|row| row.position).collect();
        assert_eq!(positions, vec![0, 1, 2]);
    }

    #[test]
    fn inside_appends_as_last_child() {
        let folders = fixture();
        let plan = plan_move(&folders, 4, 2, DropZone::Inside).unwrap();
        assert_eq!(
            plan,
            vec![
                PositionUpdate { id: 3, position: 0, parent_id: Some(2) },
                PositionUpdate { id: 4, position: 1, parent_id: Some(2) },
            ]
        );
    }

    #[test]
    fn moving_across_levels_keeps_destination_contiguous() {
        let folders = fixture();
        // C leaves B and lands at root, after D
        let plan = plan_move(&folders, 3, 4, DropZone::After).unwrap();
        let order: Vec<(i64, i64)> = plan.iter().map(|row| (row.id, row.position)).collect();
        assert_eq!(order, vec![(1, 0), (4, 1), (3, 2), (5, 3)]);
        assert!(plan.iter().all(|row| row.parent_id.is_none()));
    }

    #[test]
    fn visibility_requires_every_ancestor_expanded() {
        let folders = fixture();

        // Collapsed: only roots
        let rows = visible_nodes(&folders, &HashSet::new());
        let ids: Vec<i64> = rows.iter().map(|(id, _)| *id).collect();
        assert_eq!(ids, vec![1, 4, 5]);

        // Expanding A exposes B but not C
        let rows = visible_nodes(&folders, &HashSet::from([1]));
        let ids: Vec<i64> = rows.iter().map(|(id, _)| *id).collect();
        assert_eq!(ids, vec![1, 2, 4, 5]);

        // Expanding C's ancestor chain exposes the full path with depths
        let rows = visible_nodes(&folders, &HashSet::from([1, 2]));
        assert_eq!(rows, vec![(1, 0), (2, 1), (3, 2), (4, 0), (5, 0)]);
    }

    #[test]
    fn delete_lifts_children_to_the_grandparent() {
        let folders = fixture();
        let plan = plan_delete(&folders, 2).unwrap();
        assert_eq!(plan.new_parent, Some(1));
        assert_eq!(
            plan.reassignments,
            vec![PositionUpdate { id: 3, position: 0, parent_id: Some(1) }]
        );

        // Deleting a root folder lifts children to root
        let plan = plan_delete(&folders, 1).unwrap();
        assert_eq!(plan.new_parent, None);
        let order: Vec<i64> = plan.reassignments.iter().map(|row| row.id).collect();
        assert_eq!(order, vec![4, 5, 2]);
    }
}
