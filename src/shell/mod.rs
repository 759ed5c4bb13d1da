//! Interactive command loop.

mod command;
mod help;
mod render;

use std::{env, io::Write, path::Path};

use anyhow::{Context, Result};
use sft::{
    client::{
        fs::{download_file, upload_file},
        Session,
    },
    protocol::Outcome,
};
use tokio::{
    io::{self, AsyncBufReadExt, BufReader},
    process,
};

pub use command::Command;

const PROMPT: &str = "sft >";

pub struct Shell {
    session: Session,
}

impl Shell {
    pub fn new(session: Session) -> Self {
        Self { session }
    }

    /// Reads commands from stdin until `EXIT` or end of input.
    pub async fn run(&mut self) -> Result<()> {
        let mut lines = BufReader::new(io::stdin()).lines();

        loop {
            print!("{PROMPT}");
            std::io::stdout().flush()?;

            let Some(line) = lines.next_line().await? else {
                println!();
                break;
            };

            match line.parse::<Command>() {
                Ok(command) => {
                    if !self.run_command(command).await {
                        break;
                    }
                }
                Err(err) => eprintln!("Bad command syntax: {err}"),
            }
        }

        self.session.disconnect().await;
        Ok(())
    }

    /// Executes one command and reports its failure. Returns `false` once
    /// the user asked to leave.
    pub async fn run_command(&mut self, command: Command) -> bool {
        match self.execute(command).await {
            Ok(proceed) => proceed,
            Err(err) => {
                eprintln!("Error: {err:#}");
                true
            }
        }
    }

    async fn execute(&mut self, command: Command) -> Result<bool> {
        match command {
            Command::Connect(address) => {
                let version = self.session.connect(&address).await?;
                println!("Connected, server version: {version}");
            }
            Command::Disconnect => self.session.disconnect().await,
            Command::Upload { source, target } => {
                let len = upload_file(&mut self.session, Path::new(&source), target.as_deref())
                    .await
                    .with_context(|| format!("upload of {source} failed"))?;
                debug!("uploaded {} ({} bytes)", source, len);
            }
            Command::Download { source, target } => {
                let len = download_file(
                    &mut self.session,
                    &source,
                    target.as_deref().map(Path::new),
                )
                .await
                .with_context(|| format!("download of {source} failed"))?;
                debug!("downloaded {} ({} bytes)", source, len);
            }
            Command::Dir => {
                for entry in self.session.read_dir().await? {
                    println!("{}", render::entry_line(&entry));
                }
            }
            Command::ChangeDir(name) => {
                let reply = self.session.change_dir(&name).await?;
                report(reply.outcome);
                println!("Current directory: {}", reply.path);
            }
            Command::MakeDir(name) => report(self.session.make_dir(&name).await?),
            Command::RemoveDir(name) => report(self.session.remove_dir(&name).await?),
            Command::Delete(name) => report(self.session.remove_file(&name).await?),
            Command::LocalChangeDir(path) => {
                if let Some(path) = path {
                    env::set_current_dir(&path)
                        .with_context(|| format!("cannot change local directory to {path}"))?;
                }
                println!("Current local directory: {}", env::current_dir()?.display());
            }
            Command::Local(command) => run_local(&command).await?,
            Command::Help => help::print_help(),
            Command::Exit => {
                self.session.disconnect().await;
                return Ok(false);
            }
            Command::Empty => {}
        }

        Ok(true)
    }
}

fn report(outcome: Outcome) {
    if let Outcome::Refused(code) = outcome {
        eprintln!("Operation failed, status {code}");
    }
}

async fn run_local(command: &str) -> Result<()> {
    if command.trim().is_empty() {
        return Ok(());
    }

    let (shell, flag) = if cfg!(windows) {
        ("cmd", "/C")
    } else {
        ("sh", "-c")
    };

    let status = process::Command::new(shell)
        .arg(flag)
        .arg(command)
        .status()
        .await
        .with_context(|| format!("cannot run {command}"))?;
    debug!("local command exited with {}", status);

    Ok(())
}
