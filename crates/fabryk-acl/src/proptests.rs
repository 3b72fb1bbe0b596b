//! Property-based tests for permission evaluation.

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::HashSet;

    use proptest::prelude::*;

    use crate::chain::{ResolvedAcl, ResolvedChain};
    use crate::evaluator::{ExcludedPermissions, PermissionEvaluator};
    use crate::model::{AccessControlEntry, AccessStatus, Acl, READ_PERMISSIONS};

    fn entry() -> impl Strategy<Value = AccessControlEntry> {
        (
            prop::sample::select(vec!["GROUP_EVERYONE", "GROUP_a", "USER_alice", "USER_bob"]),
            prop::sample::select(vec!["Read", "Write", READ_PERMISSIONS]),
            any::<bool>(),
        )
            .prop_map(|(authority, permission, allowed)| AccessControlEntry {
                authority: authority.to_string(),
                permission: permission.to_string(),
                status: if allowed {
                    AccessStatus::Allowed
                } else {
                    AccessStatus::Denied
                },
            })
    }

    fn entry_lists() -> impl Strategy<Value = Vec<Vec<AccessControlEntry>>> {
        prop::collection::vec(prop::collection::vec(entry(), 0..6), 1..6)
    }

    fn chain_of(lists: Vec<Vec<AccessControlEntry>>) -> ResolvedChain {
        let links = lists
            .into_iter()
            .enumerate()
            .map(|(i, entries)| {
                let id = i as u64;
                let acl = if i == 0 {
                    Acl::root(id)
                } else {
                    Acl::inheriting(id, id - 1)
                };
                ResolvedAcl::new(acl, entries)
            })
            .collect();
        ResolvedChain::from_root_first(links)
    }

    proptest! {
        #[test]
        fn test_output_has_no_duplicates(lists in entry_lists()) {
            let readable = PermissionEvaluator::new().readable_authorities(&chain_of(lists));
            let distinct: HashSet<&String> = readable.iter().collect();
            prop_assert_eq!(distinct.len(), readable.len());
        }

        #[test]
        fn test_output_is_first_seen_order(lists in entry_lists()) {
            let mut expected: Vec<String> = Vec::new();
            for entry in lists.iter().flatten() {
                if entry.status == AccessStatus::Allowed
                    && entry.permission != READ_PERMISSIONS
                    && !expected.contains(&entry.authority)
                {
                    expected.push(entry.authority.clone());
                }
            }
            let readable = PermissionEvaluator::new().readable_authorities(&chain_of(lists));
            prop_assert_eq!(readable.into_vec(), expected);
        }

        #[test]
        fn test_every_authority_has_a_content_grant(lists in entry_lists()) {
            let chain = chain_of(lists.clone());
            let readable = PermissionEvaluator::new().readable_authorities(&chain);
            for authority in &readable {
                let granted = lists.iter().flatten().any(|e| {
                    &e.authority == authority
                        && e.status == AccessStatus::Allowed
                        && e.permission != READ_PERMISSIONS
                });
                prop_assert!(granted, "{} has no content grant", authority);
            }
        }

        #[test]
        fn test_extra_exclusions_never_admit_read_permissions(
            lists in entry_lists(),
            extra in prop::collection::vec(
                prop::sample::select(vec!["Read", "Write", "ReadAudit"]),
                0..3,
            ),
        ) {
            let excluded = ExcludedPermissions::from_names(extra);
            let evaluator = PermissionEvaluator::with_excluded(excluded);
            let readable = evaluator.readable_authorities(&chain_of(lists.clone()));
            for authority in &readable {
                let granted = lists.iter().flatten().any(|e| {
                    &e.authority == authority
                        && e.status == AccessStatus::Allowed
                        && e.permission != READ_PERMISSIONS
                });
                prop_assert!(granted, "{} admitted through ReadPermissions", authority);
            }
        }

        #[test]
        fn test_adding_an_ancestor_never_revokes(
            lists in entry_lists(),
            ancestor in prop::collection::vec(entry(), 0..6),
        ) {
            let before = PermissionEvaluator::new().readable_authorities(&chain_of(lists.clone()));

            let mut extended = vec![ancestor];
            extended.extend(lists);
            let after = PermissionEvaluator::new().readable_authorities(&chain_of(extended));

            for authority in &before {
                prop_assert!(after.contains(authority));
            }
        }

        #[test]
        fn test_evaluation_is_deterministic(lists in entry_lists()) {
            let chain = chain_of(lists);
            let evaluator = PermissionEvaluator::new();
            prop_assert_eq!(
                evaluator.readable_authorities(&chain),
                evaluator.readable_authorities(&chain)
            );
        }
    }
}
