//! Local pipeline template
//!
//! Writes `.buildkite/template.yaml` under the output directory. The file is
//! rewritten from scratch on every run and is never committed by this tool.

use kitegen_core::domain::template::PipelineTemplate;
use kitegen_core::types::ProjectName;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::info;

use super::error::{ProvisionError, Result};

/// Directory holding the template, relative to the output directory
pub const TEMPLATE_DIR: &str = ".buildkite";

/// File name of the template
pub const TEMPLATE_FILE: &str = "template.yaml";

/// Render the template for a project as YAML
pub fn render_template(name: &ProjectName) -> Result<String> {
    Ok(serde_yaml::to_string(&PipelineTemplate::for_project(name))?)
}

/// Write the project's template, replacing any previous one
///
/// Missing directories are created with mode 0755.
///
/// # Returns
/// Path of the written file
pub fn write_template(root: &Path, name: &ProjectName) -> Result<PathBuf> {
    let document = render_template(name)?;

    let dir = root.join(TEMPLATE_DIR);
    create_template_dir(&dir).map_err(ProvisionError::CreateTemplateDir)?;

    let path = dir.join(TEMPLATE_FILE);
    fs::write(&path, document).map_err(ProvisionError::WriteTemplate)?;

    info!("Template written to {}", path.display());

    Ok(path)
}

fn create_template_dir(dir: &Path) -> io::Result<()> {
    let mut builder = fs::DirBuilder::new();
    builder.recursive(true);

    #[cfg(unix)]
    {
        use std::os::unix::fs::DirBuilderExt;
        builder.mode(0o755);
    }

    builder.create(dir)
}
