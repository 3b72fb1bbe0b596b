//! End-to-end readable-authority scenarios against an in-memory store.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]

use std::sync::Arc;

use fabryk_acl::{
    AccessControlEntry as Ace, Acl, AclConfig, AclFixture, AclId, AclStore, CachedAclStore, Error,
    MemoryAclStore, NodeRef, READ_PERMISSIONS, ReadableAuthorityService,
};

fn node(uuid: &str) -> NodeRef {
    NodeRef::new("workspace", "SpacesStore", uuid)
}

#[tokio::test]
async fn test_read_permissions_excluded_and_denials_ignored() {
    let store = MemoryAclStore::new()
        .with_acl(
            Acl::root(100),
            vec![
                Ace::allowed("GROUP_EVERYONE", READ_PERMISSIONS),
                Ace::allowed("GROUP_EVERYONE", "Read"),
            ],
        )
        .with_acl(
            Acl::inheriting(101, 100),
            vec![Ace::allowed("USER_alice", "Read"), Ace::denied("USER_bob", "Read")],
        )
        .with_node(node("doc"), 101);

    let service = ReadableAuthorityService::new(Arc::new(store));
    let readable = service.compute(&node("doc")).await.unwrap();

    assert_eq!(readable.as_slice(), ["GROUP_EVERYONE", "USER_alice"]);
    assert!(!readable.contains("USER_bob"));
}

#[tokio::test]
async fn test_inheritance_cutoff_hides_parent_grants() {
    let store = MemoryAclStore::new()
        .with_acl(Acl::root(200), vec![Ace::allowed("GROUP_EVERYONE", "Read")])
        .with_acl(
            Acl::inheriting(201, 200).without_inheritance(),
            vec![Ace::allowed("USER_carol", "Read")],
        )
        .with_node(node("private"), 201);

    let service = ReadableAuthorityService::new(Arc::new(store));
    let chain = service.resolve_node_chain(&node("private")).await.unwrap();
    assert_eq!(chain.ids(), vec![AclId::new(201)]);

    let readable = service.compute(&node("private")).await.unwrap();
    assert_eq!(readable.as_slice(), ["USER_carol"]);
}

#[tokio::test]
async fn test_node_without_acl_is_not_found() {
    let store = MemoryAclStore::new().with_acl(Acl::root(1), vec![]);
    let service = ReadableAuthorityService::new(Arc::new(store));

    let err = service.compute(&node("orphan")).await.unwrap_err();
    assert!(matches!(err, Error::NotFound { kind: "node", .. }));
}

#[tokio::test]
async fn test_three_level_chain_order() {
    let store = MemoryAclStore::new()
        .with_acl(Acl::root(1), vec![Ace::allowed("GROUP_root", "Read")])
        .with_acl(Acl::inheriting(2, 1), vec![Ace::allowed("GROUP_mid", "Read")])
        .with_acl(Acl::inheriting(3, 2), vec![Ace::allowed("USER_leaf", "Read")])
        .with_node(node("deep"), 3);

    let service = ReadableAuthorityService::new(Arc::new(store));
    let readable = service.compute(&node("deep")).await.unwrap();
    assert_eq!(readable.as_slice(), ["GROUP_root", "GROUP_mid", "USER_leaf"]);
}

#[tokio::test]
async fn test_mutual_inheritance_fails_without_hanging() {
    let store = MemoryAclStore::new()
        .with_acl(Acl::inheriting(1, 2), vec![Ace::allowed("USER_a", "Read")])
        .with_acl(Acl::inheriting(2, 1), vec![Ace::allowed("USER_b", "Read")])
        .with_node(node("loop"), 1);

    let service = ReadableAuthorityService::new(Arc::new(store));
    let result = tokio::time::timeout(
        std::time::Duration::from_secs(5),
        service.compute(&node("loop")),
    )
    .await
    .expect("resolution must terminate");

    let err = result.unwrap_err();
    assert!(err.is_integrity_fault());
    assert_eq!(err.public_message(), "internal server error");
}

#[tokio::test]
async fn test_adding_inheritance_extends_access() {
    let store = Arc::new(
        MemoryAclStore::new()
            .with_acl(Acl::root(10), vec![Ace::allowed("USER_owner", "Read")])
            .with_acl(Acl::root(20), vec![Ace::allowed("GROUP_site", "Read")])
            .with_node(node("doc"), 10),
    );
    let service = ReadableAuthorityService::new(Arc::clone(&store));
    let before = service.compute(&node("doc")).await.unwrap();

    store.insert_acl(Acl::inheriting(10, 20)).await;
    let after = service.compute(&node("doc")).await.unwrap();

    for authority in &before {
        assert!(after.contains(authority));
    }
    assert_eq!(after.as_slice(), ["GROUP_site", "USER_owner"]);
}

#[tokio::test]
async fn test_reassigned_node_seen_through_cache() {
    let store = Arc::new(
        MemoryAclStore::new()
            .with_acl(Acl::root(1), vec![Ace::allowed("GROUP_a", "Read")])
            .with_acl(Acl::root(2), vec![Ace::allowed("GROUP_b", "Read")])
            .with_node(node("doc"), 1),
    );
    let cached = Arc::new(CachedAclStore::new(Arc::clone(&store), 100));
    let service = ReadableAuthorityService::new(Arc::clone(&cached));

    assert_eq!(service.compute(&node("doc")).await.unwrap().as_slice(), ["GROUP_a"]);

    store.assign_node(node("doc"), AclId::new(2)).await;
    assert_eq!(service.compute(&node("doc")).await.unwrap().as_slice(), ["GROUP_b"]);

    service.compute(&node("doc")).await.unwrap();
    assert!(cached.stats().await.hits >= 2);
}

#[tokio::test]
async fn test_batch_from_fixture_and_config() {
    let fixture = AclFixture::from_json_str(
        r#"{
            "acls": [
                { "id": 1, "entries": [
                    { "authority": "GROUP_EVERYONE", "permission": "ReadPermissions",
                      "status": "ALLOWED" },
                    { "authority": "GROUP_staff", "permission": "Read", "status": "ALLOWED" }
                ]},
                { "id": 2, "inherits_from": 1, "entries": [
                    { "authority": "USER_dave", "permission": "Write", "status": "ALLOWED" }
                ]}
            ],
            "nodes": [
                { "node_ref": "workspace://SpacesStore/one", "acl_id": 1 },
                { "node_ref": "workspace://SpacesStore/two", "acl_id": 2 }
            ]
        }"#,
    )
    .unwrap();
    let store: Arc<dyn AclStore> = Arc::new(MemoryAclStore::from_fixture(fixture));
    let service =
        ReadableAuthorityService::<dyn AclStore>::from_config(store, &AclConfig::default());

    let nodes = vec![node("two"), node("gone"), node("one")];
    let results = service.compute_many(&nodes).await;

    assert_eq!(results.len(), 3);
    assert_eq!(
        results[0].result.as_ref().unwrap().as_slice(),
        ["GROUP_staff", "USER_dave"]
    );
    assert!(results[1].result.as_ref().unwrap_err().is_not_found());
    assert_eq!(results[2].result.as_ref().unwrap().as_slice(), ["GROUP_staff"]);
}

#[tokio::test]
async fn test_extra_exclusions_keep_read_permissions_excluded() {
    let store: Arc<dyn AclStore> = Arc::new(
        MemoryAclStore::new()
            .with_acl(
                Acl::root(1),
                vec![
                    Ace::allowed("GROUP_EVERYONE", READ_PERMISSIONS),
                    Ace::allowed("USER_alice", "Read"),
                ],
            )
            .with_node(node("doc"), 1),
    );
    let config: AclConfig = toml::from_str(r#"excluded_permissions = ["ReadAudit"]"#).unwrap();
    let service = ReadableAuthorityService::<dyn AclStore>::from_config(store, &config);

    let readable = service.compute(&node("doc")).await.unwrap();
    assert!(
        !readable.contains("GROUP_EVERYONE"),
        "ReadPermissions grant must never confer read access"
    );
    assert_eq!(readable.as_slice(), ["USER_alice"]);
}
