//! Editor pass: inject the trampoline into every eligible app's LaunchOptions

use std::path::Path;

use crate::vdf::operations::{read_config, touch_mtime, write_config_atomic};
use crate::vdf::pure::{
    AppIter, PlanOutcome, app_entry, apply_edits, locate_object, plan_app, validate_edit,
};
use crate::vdf::types::{EditOperation, Result, UpdateReport};

/// Run one editor pass over the config file at `path`.
///
/// Nothing is written unless at least one app needs a change and the edited
/// buffer passes validation. A rejected pass leaves the file untouched.
pub fn set_launch_options_for_all_apps(path: &Path, launch_option: &str) -> Result<UpdateReport> {
    log::info!("Reading Steam configuration: {}", path.display());
    let original = read_config(path)?;

    let (edited, mut report) = update_buffer(&original, launch_option)?;

    log::info!(
        "Processed {} apps ({} with launch options)",
        report.apps_processed,
        report.apps_with_launch_options
    );

    let Some(edited) = edited else {
        log::info!("No launch options needed updating");
        return Ok(report);
    };

    write_config_atomic(path, &edited)?;
    touch_mtime(path)?;
    report.written = true;

    log::info!(
        "Steam configuration updated: {} modifications ({} replaced, {} inserted)",
        report.modifications(),
        report.replaced,
        report.inserted
    );
    Ok(report)
}

/// Plan, apply and validate against an in-memory buffer.
///
/// Returns `None` for the buffer when no edit was needed.
pub fn update_buffer(buffer: &str, launch_option: &str) -> Result<(Option<String>, UpdateReport)> {
    let apps = locate_object(buffer, "apps")?;

    let mut report = UpdateReport::default();
    let mut ops: Vec<EditOperation> = Vec::new();

    for (app_id, span) in AppIter::new(buffer, apps) {
        let app = app_entry(buffer, &app_id, span);
        let outcome = plan_app(buffer, &app, launch_option);

        if outcome == PlanOutcome::Ineligible {
            continue;
        }

        report.apps_processed += 1;
        if app.launch_options.is_some() {
            report.apps_with_launch_options += 1;
        }
        log::debug!("Processing: {} ({})", app.app_id, app.display_name());

        match outcome {
            PlanOutcome::Edit(op) => {
                match &op {
                    EditOperation::Replace { .. } => {
                        report.replaced += 1;
                        log::info!(
                            "Updating App ID {} ({}): '{}' -> '{}'",
                            app.app_id,
                            app.display_name(),
                            app.launch_options.as_deref().unwrap_or_default(),
                            launch_option
                        );
                    }
                    EditOperation::Insert { .. } => {
                        report.inserted += 1;
                        log::info!(
                            "Creating LaunchOptions for App ID {} ({}): '{}'",
                            app.app_id,
                            app.display_name(),
                            launch_option
                        );
                    }
                }
                ops.push(op);
            }
            PlanOutcome::Unmatched => log::warn!(
                "App ID {} ({}): LaunchOptions line has unexpected spacing, skipped",
                app.app_id,
                app.display_name()
            ),
            PlanOutcome::Unchanged | PlanOutcome::Ineligible => {}
        }
    }

    if ops.is_empty() {
        return Ok((None, report));
    }

    let edited = apply_edits(buffer, &ops);
    log::debug!(
        "Original size: {}, new size: {}",
        buffer.len(),
        edited.len()
    );
    validate_edit(buffer, &edited)?;

    Ok((Some(edited), report))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vdf::pure::scanner::braces_balanced;
    use crate::vdf::types::VdfError;
    use std::fs;

    const WRAP: &str = "~/dlo/run %command%";

    const CONFIG: &str = r#""UserLocalConfigStore"
{
	"Software"
	{
		"Valve"
		{
			"Steam"
			{
				"apps"
				{
					"22380"
					{
						"LastPlayed"		"1700000000"
						"cloud"
						{
							"last_sync_state"		"synchronized"
						}
					}
					"4000"
					{
						"LastPlayed"		"1700000001"
					}
					"105600"
					{
						"name"		"Terraria"
						"LaunchOptions"		"-novid"
						"cloud"
						{
							"last_sync_state"		"synchronized"
						}
					}
					"1091500"
					{
						"LaunchOptions"		"gamemoderun %command%"
						"cloud"
						{
							"quota_files"		"10"
						}
					}
				}
			}
		}
	}
}
"#;

    fn write_config(contents: &str) -> (tempfile::TempDir, std::path::PathBuf) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("localconfig.vdf");
        fs::write(&path, contents).unwrap();
        (dir, path)
    }

    // ── update_buffer ───────────────────────────────────────────

    #[test]
    fn edits_only_cloud_synced_apps() {
        let (edited, report) = update_buffer(CONFIG, WRAP).unwrap();
        let edited = edited.unwrap();

        assert_eq!(report.apps_processed, 2);
        assert_eq!(report.apps_with_launch_options, 1);
        assert_eq!(report.replaced, 1);
        assert_eq!(report.inserted, 1);

        assert!(edited.contains("\t\t\t\t\t\t\"LaunchOptions\"\t\t\"~/dlo/run %command%\"\n\t\t\t\t\t\t\"LastPlayed\"\t\t\"1700000000\""));
        assert!(edited.contains("\"LaunchOptions\"\t\t\"~/dlo/run %command%\"\n\t\t\t\t\t\t\"cloud\""));
        assert!(!edited.contains("\"-novid\""));
        // 4000 has no cloud state, 1091500 has no last_sync_state
        assert!(edited.contains("\"gamemoderun %command%\""));
        assert_eq!(edited.matches("\"LaunchOptions\"").count(), 3);
        assert!(braces_balanced(&edited));
    }

    #[test]
    fn bytes_outside_edits_are_untouched() {
        let (edited, _) = update_buffer(CONFIG, WRAP).unwrap();
        let edited = edited.unwrap();
        let inserted = "\t\t\t\t\t\t\"LaunchOptions\"\t\t\"~/dlo/run %command%\"\n";
        let restored = edited
            .replacen(inserted, "", 1)
            .replacen("\"~/dlo/run %command%\"", "\"-novid\"", 1);
        assert_eq!(restored, CONFIG);
    }

    #[test]
    fn missing_apps_section_is_an_error() {
        let err = update_buffer("\"UserLocalConfigStore\"\n{\n}\n", WRAP).unwrap_err();
        assert!(matches!(err, VdfError::SectionNotFound(_)));
    }

    #[test]
    fn shrinking_replace_is_rejected() {
        let long = "x".repeat(400);
        let buf = format!(
            "\"apps\"\n{{\n\t\"1234\"\n\t{{\n\t\t\"LaunchOptions\"\t\t\"{long}\"\n\t\t\"cloud\"\n\t\t{{\n\t\t\t\"last_sync_state\"\t\t\"x\"\n\t\t}}\n\t}}\n}}\n"
        );
        let err = update_buffer(&buf, "run %command%").unwrap_err();
        assert!(matches!(err, VdfError::ValidationFailed(_)));
    }

    // ── set_launch_options_for_all_apps ─────────────────────────

    #[test]
    fn inserts_launch_options_with_matching_indent() {
        let config = "\"apps\"\n{\n\t\"12345\"\n\t{\n\t\t\"LastPlayed\"\t\t\"1\"\n\t\t\"cloud\"\n\t\t{\n\t\t\t\"last_sync_state\"\t\t\"synchronized\"\n\t\t}\n\t}\n}\n";
        let (_dir, path) = write_config(config);

        let report = set_launch_options_for_all_apps(&path, WRAP).unwrap();

        assert!(report.written);
        assert_eq!(report.inserted, 1);
        let on_disk = fs::read_to_string(&path).unwrap();
        assert_eq!(
            on_disk,
            "\"apps\"\n{\n\t\"12345\"\n\t{\n\t\t\"LaunchOptions\"\t\t\"~/dlo/run %command%\"\n\t\t\"LastPlayed\"\t\t\"1\"\n\t\t\"cloud\"\n\t\t{\n\t\t\t\"last_sync_state\"\t\t\"synchronized\"\n\t\t}\n\t}\n}\n"
        );
    }

    #[test]
    fn second_pass_makes_no_write() {
        let (_dir, path) = write_config(CONFIG);

        let first = set_launch_options_for_all_apps(&path, WRAP).unwrap();
        assert!(first.written);
        let after_first = fs::read(&path).unwrap();
        let mtime = fs::metadata(&path).unwrap().modified().unwrap();

        let second = set_launch_options_for_all_apps(&path, WRAP).unwrap();
        assert!(!second.written);
        assert_eq!(second.modifications(), 0);
        assert_eq!(second.apps_processed, 2);
        assert_eq!(fs::read(&path).unwrap(), after_first);
        assert_eq!(fs::metadata(&path).unwrap().modified().unwrap(), mtime);
    }

    #[test]
    fn rejected_pass_leaves_file_bytes_unchanged() {
        let long = "y".repeat(1000);
        let config = format!(
            "\"apps\"\n{{\n\t\"4321\"\n\t{{\n\t\t\"LaunchOptions\"\t\t\"{long}\"\n\t\t\"cloud\"\n\t\t{{\n\t\t\t\"last_sync_state\"\t\t\"x\"\n\t\t}}\n\t}}\n}}\n"
        );
        let (_dir, path) = write_config(&config);
        let before = fs::read(&path).unwrap();

        let err = set_launch_options_for_all_apps(&path, WRAP).unwrap_err();

        assert!(matches!(err, VdfError::ValidationFailed(_)));
        assert_eq!(fs::read(&path).unwrap(), before);
        assert!(!path.with_extension("vdf.tmp").exists());
    }

    #[test]
    fn missing_file_is_io_failure() {
        let dir = tempfile::tempdir().unwrap();
        let err = set_launch_options_for_all_apps(&dir.path().join("nope.vdf"), WRAP).unwrap_err();
        assert!(matches!(err, VdfError::Io { .. }));
    }
}
