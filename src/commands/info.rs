use anyhow::Result;
use serde::Serialize;

use crate::package::{LinkageInfo, PackageDescriptor, describe_linkage};
use crate::stage::DEFAULT_RULES;

#[derive(Serialize)]
struct PackageInfo<'a> {
    #[serde(flatten)]
    descriptor: &'a PackageDescriptor,
    linkage: LinkageInfo,
}

/// Renders the descriptor, linkage and staging layout.
pub fn render_info(descriptor: &PackageDescriptor, json: bool) -> Result<String> {
    if json {
        let info = PackageInfo {
            descriptor,
            linkage: describe_linkage(),
        };
        return Ok(serde_json::to_string_pretty(&info)?);
    }

    let mut lines = vec![
        format!("{} {}", descriptor.name, descriptor.version),
        format!("  {}", descriptor.description),
        format!("  license:  {}", descriptor.license),
        format!("  homepage: {}", descriptor.homepage),
        format!("  release:  {}", descriptor.download_url("")),
        format!("  requires: {}", descriptor.requires.join(", ")),
        format!("  link:     {}", describe_linkage().libs.join(", ")),
        "  layout:".to_string(),
    ];
    for (pattern, dest) in DEFAULT_RULES {
        lines.push(format!("    {:<20} -> {}/", pattern, dest));
    }
    Ok(lines.join("\n"))
}

pub fn info(descriptor: &PackageDescriptor, json: bool) -> Result<()> {
    println!("{}", render_info(descriptor, json)?);
    Ok(())
}
