use std::{collections::BTreeMap as Map, path::PathBuf};

#[derive(Clone, Debug, Hash, PartialOrd, Ord, PartialEq, Eq)]
pub struct ImageName(pub String);

#[derive(Clone, Debug, Hash, PartialOrd, Ord, PartialEq, Eq)]
pub struct ContainerName(pub String);

#[derive(Clone, Debug, Hash, PartialOrd, Ord, PartialEq, Eq)]
pub struct ContainerId(pub String);

impl ContainerId {
    /// The short form the runtime shows in listings.
    pub fn short(&self) -> String {
        self.0.chars().take(12).collect()
    }
}

#[derive(Clone, Debug, Hash)]
pub struct ImageBuildSpec {
    pub name: ImageName,
    pub context: PathBuf,
    pub pull: bool,
    pub build_args: Map<String, String>,
}

#[derive(Clone, Debug, Hash)]
pub struct BindMount {
    pub host_path: PathBuf,
    pub container_path: PathBuf,
}

#[derive(Clone, Debug, Hash)]
pub struct ContainerSpec {
    pub name: ContainerName,
    pub image_name: ImageName,
    pub interactive: bool,
    pub tty: bool,
    pub privileged: bool,
    pub mounts: Vec<BindMount>,
}
