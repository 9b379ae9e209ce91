use std::sync::Arc;

use msearch_core::editor::SettingsEditor;
use msearch_core::store::SettingsStore;

pub async fn execute(store: Arc<dyn SettingsStore>) -> anyhow::Result<()> {
    let mut editor = SettingsEditor::new();
    editor.restore_defaults(store.as_ref()).await?;
    println!("{}", editor.text());
    eprintln!("Defaults are not saved until submitted with `msearch set`.");
    Ok(())
}
