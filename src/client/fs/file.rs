use std::path::{Path, PathBuf};

use tokio::fs::{self, File};

use crate::{
    client::{error::Error, session::Session, SftResult},
    transport::Connector,
};

fn file_name(path: &Path) -> SftResult<&str> {
    path.file_name()
        .and_then(|name| name.to_str())
        .ok_or_else(|| Error::InvalidArgument(format!("{} has no file name", path.display())))
}

/// Uploads a local file into the current remote directory and returns its
/// length. The remote name defaults to the local file name.
pub async fn upload_file<C: Connector>(
    session: &mut Session<C>,
    local: &Path,
    remote: Option<&str>,
) -> SftResult<u64> {
    if !session.is_connected() {
        return Err(Error::NotConnected);
    }

    let remote = match remote {
        Some(name) => name,
        None => file_name(local)?,
    };

    let mut source = File::open(local).await?;
    let len = source.metadata().await?.len();

    session.upload(remote, &mut source, len).await?;
    Ok(len)
}

/// Downloads a file from the current remote directory and returns its
/// length. The local path defaults to the remote name in the current
/// directory.
///
/// The local file is only created once the server has confirmed the remote
/// one exists, and is removed again if the transfer fails.
pub async fn download_file<C: Connector>(
    session: &mut Session<C>,
    remote: &str,
    local: Option<&Path>,
) -> SftResult<u64> {
    let local = match local {
        Some(path) => path.to_path_buf(),
        None => PathBuf::from(file_name(Path::new(remote))?),
    };

    let download = session.open_download(remote).await?;
    let mut sink = File::create(&local).await?;

    match download.copy_to(&mut sink).await {
        Ok(len) => Ok(len),
        Err(err) => {
            drop(sink);
            if let Err(remove_err) = fs::remove_file(&local).await {
                warn!("could not remove {}: {}", local.display(), remove_err);
            }
            Err(err)
        }
    }
}
