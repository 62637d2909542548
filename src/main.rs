use anyhow::Result;
use crossterm::{
    style::{self, Colorize, Styler},
    QueueableCommand,
};
use log::info;
use std::{
    io::{stdout, Write},
    process,
};
use structopt::StructOpt;

use backends::DockerBackend;
use controller::Controller;

mod backends;
mod controller;
mod identity;
mod models;
mod services;

#[derive(Debug, StructOpt)]
#[structopt(
    name = "pidrone-dev",
    about = "A tool for building and running the pidrone development container with docker."
)]
enum Opt {
    Build {
        #[structopt(short, long)]
        /// Pull a newer version of the base image before building.
        pull: bool,
    },
    /// Creates the development container, replacing any previous one.
    Create,
    Run,
}

fn main() -> Result<()> {
    pretty_env_logger::init_custom_env("LOG");

    let opt = Opt::from_args();

    let mut stdout = stdout();

    let backend = DockerBackend::new();
    let mut controller = Controller::init(backend);

    match opt {
        Opt::Build { pull } => {
            let identity = identity::resolve()?;
            info!("resolved host identity {:?}", identity);

            let image_name = controller.image_name();
            stdout
                .queue(style::Print(format!("Building {}\n", image_name.0)))?
                .flush()?;

            controller.build_image(&identity, pull)?;

            stdout
                .queue(style::PrintStyledContent("Built ".green().bold()))?
                .queue(style::Print(format!("{}\n", image_name.0)))?
                .flush()?;
        }
        Opt::Create => {
            let container_name = controller.container_name();
            stdout
                .queue(style::Print(format!("Creating {} ... ", container_name.0)))?
                .flush()?;

            let container_id = controller.create_container()?;

            stdout
                .queue(style::PrintStyledContent("done".green().bold()))?
                .queue(style::Print(format!(" ({})\n", container_id.short())))?
                .flush()?;
        }
        Opt::Run => {
            let container_name = controller.container_name();
            stdout
                .queue(style::Print(format!("Starting {}\n", container_name.0)))?
                .flush()?;

            let code = controller.run_container()?;
            info!("container exited with code {}", code);

            // The task's exit status mirrors the container's.
            if code != 0 {
                process::exit(code);
            }
        }
    }

    Ok(())
}
