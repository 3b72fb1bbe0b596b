//! `readers` and `chain` command implementations.

use std::io::Write;
use std::sync::Arc;

use fabryk_acl::{
    AclConfig, AclFixture, AclId, AclStore, MemoryAclStore, NodeRef, ReadableAuthorities,
    ReadableAuthorityService, resolve_chain,
};
use fabryk_core::Error as CoreError;
use serde::Serialize;

use crate::Result;
use crate::config::FabrykConfig;

/// One line of `readers` output.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeReaders {
    /// The node.
    pub node_ref: NodeRef,
    /// Readable authorities when resolution succeeded.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub readable_authorities: Option<ReadableAuthorities>,
    /// Public error message when it failed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<&'static str>,
}

/// Pick the fixture path: command line first, then the config file.
pub fn fixture_path<'a>(cli: Option<&'a str>, config: &'a FabrykConfig) -> Result<&'a str> {
    cli.or(config.fixture.as_deref()).ok_or_else(|| {
        CoreError::config("No ACL fixture given; pass --fixture or set `fixture` in the config")
            .into()
    })
}

/// Load a fixture into a store.
pub fn load_store(path: &str) -> Result<Arc<dyn AclStore>> {
    let fixture = AclFixture::from_path(path)?;
    Ok(Arc::new(MemoryAclStore::from_fixture(fixture)))
}

/// Resolve readable authorities for `nodes` and write one JSON object per
/// line.
///
/// Returns `true` when every node resolved.
pub async fn run_readers(
    store: Arc<dyn AclStore>,
    config: &AclConfig,
    nodes: &[NodeRef],
    out: &mut impl Write,
) -> Result<bool> {
    let service = ReadableAuthorityService::<dyn AclStore>::from_config(store, config);
    let mut all_ok = true;

    for resolution in service.compute_many(nodes).await {
        let line = match resolution.result {
            Ok(readable) => NodeReaders {
                node_ref: resolution.node,
                readable_authorities: Some(readable),
                error: None,
            },
            Err(e) => {
                all_ok = false;
                NodeReaders {
                    node_ref: resolution.node,
                    readable_authorities: None,
                    error: Some(e.public_message()),
                }
            }
        };
        serde_json::to_writer(&mut *out, &line)?;
        writeln!(out)?;
    }

    Ok(all_ok)
}

/// Resolve the chain of `acl_id` and write it as pretty JSON, root first.
pub async fn run_chain(
    store: Arc<dyn AclStore>,
    acl_id: AclId,
    out: &mut impl Write,
) -> Result<()> {
    let chain = resolve_chain(store.as_ref(), acl_id).await?;
    let links: Vec<_> = chain.iter().collect();
    serde_json::to_writer_pretty(&mut *out, &links)?;
    writeln!(out)?;
    Ok(())
}
