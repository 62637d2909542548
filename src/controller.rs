use anyhow::Result;
use log::{debug, info};
use std::path::PathBuf;

use crate::{
    identity::HostIdentity,
    models::{BindMount, ContainerId, ContainerName, ContainerSpec, ImageBuildSpec, ImageName},
    services::ContainerBackend,
};

const IMAGE_NAME: &str = "pidrone_pkg:ente";
const CONTAINER_NAME: &str = "pidrone_pkg";
const WORKSPACE_PATH: &str = "/home/duckie/catkin_ws";

pub struct Controller {
    backend: Box<dyn ContainerBackend>,
}

impl Controller {
    pub fn init<B>(backend: B) -> Controller
    where
        B: 'static + ContainerBackend,
    {
        Controller {
            backend: Box::new(backend),
        }
    }

    pub fn image_name(&self) -> ImageName {
        ImageName(IMAGE_NAME.into())
    }

    pub fn container_name(&self) -> ContainerName {
        ContainerName(CONTAINER_NAME.into())
    }

    /// Builds the development image from the Dockerfile in the current
    /// directory, with the host identity baked in as build arguments.
    pub fn build_image(&mut self, identity: &HostIdentity, pull: bool) -> Result<()> {
        let image_spec = ImageBuildSpec {
            name: self.image_name(),
            context: PathBuf::from("."),
            pull,
            build_args: identity.build_args(),
        };
        info!("building {:?} from {:?}", IMAGE_NAME, image_spec.context);

        self.backend.build_image(image_spec)
    }

    /// Creates the development container, replacing any previous instance.
    /// Removal is allowed to fail: a missing container is the usual case
    /// and must not block creation.
    pub fn create_container(&mut self) -> Result<ContainerId> {
        match self.backend.remove_container(CONTAINER_NAME) {
            Ok(()) => info!("removed existing container {:?}", CONTAINER_NAME),
            Err(err) => debug!("nothing to remove: {:#}", err),
        }

        let container_spec = ContainerSpec {
            name: self.container_name(),
            image_name: self.image_name(),
            interactive: true,
            tty: true,
            privileged: true,
            mounts: vec![workspace_mount()],
        };

        self.backend.create_container(container_spec)
    }

    pub fn run_container(&mut self) -> Result<i32> {
        self.backend.start_container(CONTAINER_NAME)
    }
}

fn workspace_mount() -> BindMount {
    // Same path on both sides, so paths baked into build artifacts stay
    // valid inside the container.
    BindMount {
        host_path: PathBuf::from(WORKSPACE_PATH),
        container_path: PathBuf::from(WORKSPACE_PATH),
    }
}
