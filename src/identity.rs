use anyhow::{anyhow, Context, Result};
use nix::unistd::{getegid, geteuid, Gid, Group, Uid, User};
use std::collections::BTreeMap as Map;

/// The effective user and group of the invoking process.
#[derive(Clone, Debug, Hash)]
pub struct HostIdentity {
    pub uid: u32,
    pub gid: u32,
    pub user: String,
    pub group: String,
}

/// Resolves the effective user and group of the calling process, the same
/// values `id -u`, `id -g`, `id -un` and `id -gn` print.
pub fn resolve() -> Result<HostIdentity> {
    resolve_from(geteuid(), getegid())
}

fn resolve_from(uid: Uid, gid: Gid) -> Result<HostIdentity> {
    let user = User::from_uid(uid)
        .context("failed to look up the invoking user")?
        .ok_or_else(|| anyhow!("no passwd entry for uid {}", uid))?;
    let group = Group::from_gid(gid)
        .context("failed to look up the invoking group")?
        .ok_or_else(|| anyhow!("no group entry for gid {}", gid))?;

    Ok(HostIdentity {
        uid: uid.as_raw(),
        gid: gid.as_raw(),
        user: user.name,
        group: group.name,
    })
}

impl HostIdentity {
    /// The build arguments the development Dockerfile expects. The image
    /// recreates the invoking user inside the container so the mounted
    /// workspace keeps its ownership.
    pub fn build_args(&self) -> Map<String, String> {
        let mut args = Map::new();
        args.insert("hostuid".into(), self.uid.to_string());
        args.insert("hostgid".into(), self.gid.to_string());
        args.insert("hostuser".into(), self.user.clone());
        args.insert("hostgroup".into(), self.group.clone());
        args
    }
}
