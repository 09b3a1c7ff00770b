use {
    crate::{
        domain::artifact::{self, Artifact},
        infra::observe,
    },
    std::path::Path,
    tokio::fs,
};

/// Reads a compiled contract artifact from disk.
pub async fn load(path: &Path) -> Result<Artifact, artifact::Error> {
    let json = fs::read_to_string(path).await?;
    let artifact = Artifact::from_json(&json)?;
    observe::loaded_artifact(path, &artifact);
    Ok(artifact)
}
