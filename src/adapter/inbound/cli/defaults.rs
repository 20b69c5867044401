//! Built-in default document and per-section editing schemas.

use crate::domain::codec;
use crate::domain::schema::{ActionKind, ActionSchema, EditOptions};
use crate::domain::{Document, Literal, Value};
use crate::infrastructure::store::{FINGERPRINT_OPTION, FINGERPRINT_SECTION};

use super::paths;

pub const GENERAL: &str = "General";
pub const VARIABLES: &str = "Variables";
pub const ORDER_STATUS: &str = "Order Status";
pub const ACTIONS: &str = "Actions";

/// Browser action keys understood by action scripts.
pub const ACTION_KEYS: [&str; 7] = ["clear", "click", "exist", "get", "refresh", "send_keys", "sleep"];

fn entry(fields: &[&str]) -> Vec<Literal> {
    fields.iter().map(|field| Literal::from(*field)).collect()
}

fn script(entries: Vec<Vec<Literal>>) -> String {
    codec::encode(&Value::TupleList(entries))
}

fn replace_sbi_securities() -> String {
    script(vec![
        entry(&["get", "https://www.sbisec.co.jp/ETGate"]),
        entry(&["sleep", "0.8"]),
        entry(&["click", "//input[@name=\"ACT_login\"]"]),
        entry(&["click", "//a[text()=\"ポートフォリオ\"]"]),
        entry(&["click", "//a[text()=\"登録銘柄リストの追加・置き換え\"]"]),
        entry(&["click", "//img[@alt=\"登録銘柄リストの追加・置き換え機能を利用する\"]"]),
        entry(&["click", "//*[@name=\"tool_from\" and @value=\"3\"]"]),
        entry(&["click", "//input[@value=\"次へ\"]"]),
        entry(&["click", "//*[@name=\"tool_to_1\" and @value=\"1\"]"]),
        entry(&["click", "//input[@value=\"次へ\"]"]),
        entry(&["click", "//*[@name=\"add_replace_tool_01\" and @value=\"1_2\"]"]),
        entry(&["click", "//input[@value=\"確認画面へ\"]"]),
        entry(&["click", "//input[@value=\"指示実行\"]"]),
    ])
}

fn export_to_yahoo_finance() -> String {
    let portfolio = "//*[@id=\"Col1-0-Portfolios-Proxy\"]//a[text()=\"${Variables:watchlist}\"]";
    let delete_existing = Literal::from_tuple_list(&[
        entry(&["click", portfolio]),
        entry(&["click", "//span[text()=\"Settings\"]"]),
        entry(&["sleep", "0.8"]),
        entry(&["click", "//span[text()=\"Delete Portfolio\"]"]),
        entry(&["click", "//span[text()=\"Confirm\"]"]),
    ]);
    let mut exist = entry(&["exist", portfolio]);
    exist.push(delete_existing);

    script(vec![
        entry(&["get", "https://finance.yahoo.com/portfolios"]),
        exist,
        entry(&["click", "//span[text()=\"Import\"]"]),
        entry(&[
            "send_keys",
            "//input[@name=\"ext_pf\"]",
            "${General:csv_directory}\\${Variables:watchlist}.csv",
        ]),
        entry(&["click", "//span[text()=\"Submit\"]"]),
        entry(&["refresh"]),
        entry(&["sleep", "0.8"]),
        entry(&["click", "//a[text()=\"Imported from Yahoo\"]"]),
        entry(&["click", "//span[text()=\"Settings\"]"]),
        entry(&["click", "//span[text()=\"Rename Portfolio\"]"]),
        entry(&["clear", "//input[@value=\"Imported from Yahoo\"]"]),
        entry(&[
            "send_keys",
            "//input[@value=\"Imported from Yahoo\"]",
            "${Variables:watchlist}",
        ]),
        entry(&["click", "//span[text()=\"Save\"]"]),
        entry(&["sleep", "0.8"]),
    ])
}

fn get_order_status() -> String {
    script(vec![
        entry(&["get", "https://www.sbisec.co.jp/ETGate"]),
        entry(&["sleep", "0.8"]),
        entry(&["click", "//input[@name=\"ACT_login\"]"]),
        entry(&["click", "//a[text()=\"注文照会\"]"]),
    ])
}

fn output_columns() -> String {
    let column = |name: Option<&str>| name.map_or(Literal::None, Literal::from);
    Literal::List(
        [
            Some("entry_date"),
            None,
            None,
            Some("entry_time"),
            Some("symbol"),
            Some("size"),
            Some("trade_type"),
            Some("trade_style"),
            Some("entry_price"),
            None,
            None,
            Some("exit_date"),
            Some("exit_time"),
            Some("exit_price"),
        ]
        .into_iter()
        .map(column)
        .collect(),
    )
    .to_string()
}

/// The document every user document is compared against and merged onto.
#[must_use]
pub fn default_document() -> Document {
    let mut document = Document::new();

    document.set(GENERAL, "portfolio", "");
    document.set(GENERAL, "portfolio_backup_directory", "");
    document.set(GENERAL, "headless", "True");
    document.set(GENERAL, "user_data_dir", paths::browser_user_data().display().to_string());
    document.set(GENERAL, "profile_directory", "Default");
    document.set(GENERAL, "implicitly_wait", "4");
    document.set(GENERAL, "csv_directory", paths::downloads_dir().display().to_string());
    document.set(FINGERPRINT_SECTION, FINGERPRINT_OPTION, "");

    document.set(VARIABLES, "watchlist", "");

    document.set(ORDER_STATUS, "output_columns", output_columns());
    document.set(ORDER_STATUS, "table_identifier", "注文種別");
    document.set(ORDER_STATUS, "symbol_regex", r"^.* (\d{4}) 東証$$");
    document.set(ORDER_STATUS, "symbol_replacement", r"\1");
    document.set(ORDER_STATUS, "margin_trading", "信新");
    document.set(ORDER_STATUS, "buying_on_margin", "信新買");
    document.set(ORDER_STATUS, "execution_column", "3");
    document.set(ORDER_STATUS, "execution", "約定");
    document.set(ORDER_STATUS, "datetime_column", "5");
    document.set(ORDER_STATUS, "datetime_pattern", r"^(\d{2}/\d{2}) (\d{2}:\d{2}:\d{2})$$");
    document.set(ORDER_STATUS, "date_replacement", r"\1");
    document.set(ORDER_STATUS, "time_replacement", r"\2");
    document.set(ORDER_STATUS, "size_column", "6");
    document.set(ORDER_STATUS, "price_column", "7");

    document.set(ACTIONS, "replace_sbi_securities", replace_sbi_securities());
    document.set(ACTIONS, "export_to_yahoo_finance", export_to_yahoo_finance());
    document.set(ACTIONS, "get_order_status", get_order_status());

    document
}

/// Action-script schema; `exist` entries may call any action in `document`.
#[must_use]
pub fn action_schema(document: &Document) -> ActionSchema {
    ActionSchema::new()
        .with_kind(ActionKind::NoValue, ["refresh"])
        .with_kind(ActionKind::ValueAndExtra, ["send_keys"])
        .with_kind(ActionKind::ControlFlow, ["exist"])
        .with_all_keys(ACTION_KEYS)
        .with_preset_calls(document.options(ACTIONS).unwrap_or_default())
}

/// Editing options for `section` of `document`.
#[must_use]
pub fn edit_options(section: &str, document: &Document) -> EditOptions {
    match section {
        ACTIONS => EditOptions::new()
            .with_insert_delete(true)
            .with_schema(action_schema(document)),
        VARIABLES => EditOptions::new().with_insert_delete(true),
        _ => EditOptions::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_document_has_expected_sections() {
        let document = default_document();
        let sections: Vec<&str> = document.sections().collect();
        assert_eq!(sections, vec![GENERAL, VARIABLES, ORDER_STATUS, ACTIONS]);
        assert_eq!(document.get(GENERAL, "headless"), Some("True"));
        assert_eq!(document.get(GENERAL, "implicitly_wait"), Some("4"));
        assert_eq!(document.get(GENERAL, FINGERPRINT_OPTION), Some(""));
    }

    #[test]
    fn default_actions_decode_as_tuple_lists() {
        let document = default_document();
        for option in document.options(ACTIONS).unwrap() {
            let value = codec::decode(document.get(ACTIONS, &option).unwrap()).unwrap();
            assert!(matches!(value, Value::TupleList(_)), "{option} is {}", value.kind());
        }
    }

    #[test]
    fn export_script_nests_a_control_flow_entry() {
        let document = default_document();
        let Value::TupleList(entries) =
            codec::decode(document.get(ACTIONS, "export_to_yahoo_finance").unwrap()).unwrap()
        else {
            panic!("expected a tuple list");
        };
        assert_eq!(entries[1][0], Literal::from("exist"));
        assert!(entries[1][2].as_tuple_list().is_some_and(|nested| nested.len() == 5));
        assert_eq!(entries[5], vec![Literal::from("refresh")]);
    }

    #[test]
    fn output_columns_keep_unset_slots() {
        let document = default_document();
        let columns = document.get(ORDER_STATUS, "output_columns").unwrap();
        assert!(columns.starts_with("['entry_date', None, None, 'entry_time'"));
        assert!(matches!(codec::decode(columns).unwrap(), Value::Scalar(_)));
    }

    #[test]
    fn actions_schema_calls_configured_actions() {
        let document = default_document();
        let options = edit_options(ACTIONS, &document);
        assert!(options.can_insert_delete);
        assert_eq!(options.schema.kind_of("send_keys"), ActionKind::ValueAndExtra);
        assert_eq!(options.schema.kind_of("click"), ActionKind::Generic);
        assert_eq!(
            options.schema.preset_calls().map(<[String]>::len),
            Some(3)
        );
        assert!(!edit_options(GENERAL, &document).can_insert_delete);
    }
}
