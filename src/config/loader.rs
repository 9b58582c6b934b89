//! 設定ファイルの読み込み関数

use std::path::Path;

use super::{
    ConfigError,
    LocalizationOptions,
};

/// Name of the options file looked up in a workspace root.
pub const CONFIG_FILE_NAME: &str = ".localization.json";

/// ワークスペースから設定を読み込む
///
/// `.localization.json` ファイルを探して読み込む
///
/// # Arguments
/// * `workspace_root` - ワークスペースのルートパス
///
/// # Returns
/// - `Ok(Some(options))`: 設定ファイルが見つかり、読み込みに成功
/// - `Ok(None)`: 設定ファイルが見つからない
/// - `Err(ConfigError)`: ファイル読み込みまたはパースエラー
///
/// 相対パスの `localizationsLocation` はワークスペースルートからの相対パスとして解決する
pub fn load_from_workspace(
    workspace_root: &Path,
) -> Result<Option<LocalizationOptions>, ConfigError> {
    let config_path = workspace_root.join(CONFIG_FILE_NAME);

    if !config_path.exists() {
        tracing::debug!("Configuration file not found: {:?}", config_path);
        return Ok(None);
    }

    tracing::debug!("Loading configuration from: {:?}", config_path);

    let content = std::fs::read_to_string(&config_path)?;
    let mut options: LocalizationOptions = serde_json::from_str(&content)?;

    if options.localizations_location.is_relative() {
        options.localizations_location = workspace_root.join(&options.localizations_location);
    }

    Ok(Some(options))
}
