//! テスト用ユーティリティ関数
//!
//! 複数のテストモジュールで使用される共通のヘルパー関数を提供します。
#![cfg(test)]

use serde_json::Value;

use crate::dictionary::{
    LocaleTree,
    LocalizationDictionary,
};

/// JSON オブジェクトから `LocaleTree` を作成する
///
/// オブジェクト以外の値は空のツリーになる
pub(crate) fn tree(value: Value) -> LocaleTree {
    match value {
        Value::Object(map) => map,
        _ => LocaleTree::new(),
    }
}

/// `{ "<locale>": { ... } }` 形式の JSON から辞書を作成する
///
/// ロケールの順序は JSON のキー順のまま
pub(crate) fn dictionary(value: Value) -> LocalizationDictionary {
    let mut dictionary = LocalizationDictionary::new();
    for (locale, translations) in tree(value) {
        dictionary.merge_into_locale(&locale, &tree(translations));
    }
    dictionary
}
