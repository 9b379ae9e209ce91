use std::path::PathBuf;
use std::sync::Arc;

use clap::Args;

use msearch_core::editor::{SettingsEditor, SubmitOutcome};
use msearch_core::notify::TracingNotifier;
use msearch_core::store::SettingsStore;

#[derive(Args)]
pub struct SetArgs {
    /// File holding the new value, `-` for stdin. Sent as is, after trimming
    pub input: PathBuf,
}

pub async fn execute(args: SetArgs, store: Arc<dyn SettingsStore>) -> anyhow::Result<()> {
    let raw = super::read_input(&args.input)?;

    let mut editor = SettingsEditor::new();
    match editor.submit(&raw, store.as_ref(), &TracingNotifier).await {
        SubmitOutcome::Saved => {
            println!("Settings saved.");
            Ok(())
        }
        SubmitOutcome::Rejected(message) => anyhow::bail!("{message}"),
    }
}
