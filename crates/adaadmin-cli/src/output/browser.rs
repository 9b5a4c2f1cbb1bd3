//! Renderers for server-side file locations.

use adaadmin_api_models::{DirectoryListing, LocationListResponse};

pub(crate) fn location_lines(reply: &LocationListResponse) -> Vec<String> {
    let mut lines = vec![
        " Name                              | Location".to_string(),
        "-----------------------------------|----------------------------------------".to_string(),
    ];
    lines.extend(
        reply
            .directories
            .iter()
            .map(|location| format!(" {:<33} | {}", location.name, location.location)),
    );
    lines
}

pub(crate) fn listing_lines(reply: &DirectoryListing) -> Vec<String> {
    let mut lines = vec![
        format!("Reference :  {}", reply.reference),
        format!("Location :  {}", reply.location),
    ];
    lines.extend(reply.content.iter().map(|entry| {
        format!(
            " {:<20} {:<8} {:<10} {:<10} {:<10}",
            entry.name, entry.size, entry.kind, entry.modified, entry.created
        )
    }));
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Result;
    use serde_json::json;

    #[test]
    fn locations_align_in_two_columns() -> Result<()> {
        let reply: LocationListResponse = serde_json::from_value(json!({
            "Directories": [ { "Name": "data", "Location": "/opt/adabas/data" } ]
        }))?;
        let lines = location_lines(&reply);
        assert_eq!(
            lines[2],
            " data                              | /opt/adabas/data"
        );
        Ok(())
    }

    #[test]
    fn listing_shows_reference_and_entries() -> Result<()> {
        let reply: DirectoryListing = serde_json::from_value(json!({
            "Reference": "db012", "Location": "data",
            "Content": [ { "Name": "ASSO1.012", "Size": 4096, "Type": "File",
                           "Modified": "today", "Created": "today" } ]
        }))?;
        let lines = listing_lines(&reply);
        assert_eq!(lines[0], "Reference :  db012");
        assert_eq!(
            lines[2],
            " ASSO1.012            4096     File       today      today     "
        );
        Ok(())
    }
}
