use rust_decimal_macros::dec;
use serde_json::json;
use trade_ledger_core::models::account::Account;
use trade_ledger_core::models::asset::Asset;
use trade_ledger_core::models::column::{
    AssetColumn, BooleanColumn, ColumnRef, DateColumn, DateTimeFormat, DecimalColumn,
    DecimalColumnDescription, ExtraColumn, IntegerColumn, TextColumn,
};
use trade_ledger_core::models::journal::{
    FixedColumnRole, Journal, JournalColumnRole, JournalColumnSet, JournalType,
};
use trade_ledger_core::models::settings::AccountSettings;
use trade_ledger_core::models::transaction::{
    ExtraValue, FeeCurrency, Transaction, TransactionType,
};

fn date_column() -> DateColumn {
    DateColumn::new("Date", DateTimeFormat::Date)
}

fn asset_column() -> AssetColumn {
    AssetColumn::new("Asset")
}

fn text_column() -> TextColumn {
    TextColumn::new("Text")
}

fn integer_column() -> IntegerColumn {
    IntegerColumn::new("Integer")
}

fn decimal_column(description: DecimalColumnDescription) -> DecimalColumn {
    DecimalColumn::new("Decimal", description)
}

fn boolean_column() -> BooleanColumn {
    BooleanColumn::new("Boolean")
}

// ═══════════════════════════════════════════════════════════════════
//  JournalType
// ═══════════════════════════════════════════════════════════════════

mod journal_type {
    use super::*;

    #[test]
    fn display_tags() {
        assert_eq!(JournalType::Trading.to_string(), "trading");
        assert_eq!(JournalType::Income.to_string(), "income");
        assert_eq!(JournalType::Expense.to_string(), "expense");
    }

    #[test]
    fn serde_uses_lowercase_tags() {
        assert_eq!(serde_json::to_value(JournalType::Trading).unwrap(), json!("trading"));
        assert_eq!(serde_json::to_value(JournalType::Income).unwrap(), json!("income"));
        assert_eq!(serde_json::to_value(JournalType::Expense).unwrap(), json!("expense"));
    }

    #[test]
    fn serde_rejects_wrong_case() {
        assert!(serde_json::from_value::<JournalType>(json!("Trading")).is_err());
        assert!(serde_json::from_value::<JournalType>(json!("expenses")).is_err());
    }

    #[test]
    fn default_transaction_type_per_journal_type() {
        assert_eq!(
            JournalType::Trading.default_transaction_type(),
            TransactionType::Buy
        );
        assert_eq!(
            JournalType::Income.default_transaction_type(),
            TransactionType::Income
        );
        assert_eq!(
            JournalType::Expense.default_transaction_type(),
            TransactionType::Expense
        );
    }
}

// ═══════════════════════════════════════════════════════════════════
//  FixedColumnRole
// ═══════════════════════════════════════════════════════════════════

mod fixed_column_role {
    use super::*;

    #[test]
    fn all_lists_the_nine_roles_in_display_order() {
        let tags: Vec<&str> = FixedColumnRole::ALL.into_iter().map(|r| r.as_str()).collect();
        assert_eq!(
            tags,
            vec![
                "date",
                "base",
                "baseAmount",
                "quote",
                "quoteAmount",
                "price",
                "feeBase",
                "feeQuote",
                "notes",
            ],
        );
    }

    #[test]
    fn parse_accepts_every_tag() {
        for role in FixedColumnRole::ALL {
            assert_eq!(FixedColumnRole::parse(role.as_str()), Some(role));
        }
    }

    #[test]
    fn parse_rejects_wrong_case() {
        assert_eq!(FixedColumnRole::parse("Date"), None);
        assert_eq!(FixedColumnRole::parse("baseamount"), None);
    }

    #[test]
    fn parse_rejects_near_misses() {
        assert_eq!(FixedColumnRole::parse(""), None);
        assert_eq!(FixedColumnRole::parse("extra"), None);
        assert_eq!(FixedColumnRole::parse("notes "), None);
        assert_eq!(FixedColumnRole::parse("fee"), None);
    }

    #[test]
    fn display_names() {
        assert_eq!(FixedColumnRole::Date.display_name(), "Date");
        assert_eq!(FixedColumnRole::Base.display_name(), "Base");
        assert_eq!(FixedColumnRole::BaseAmount.display_name(), "Base amount");
        assert_eq!(FixedColumnRole::Quote.display_name(), "Quote");
        assert_eq!(FixedColumnRole::QuoteAmount.display_name(), "Quote amount");
        assert_eq!(FixedColumnRole::Price.display_name(), "Price");
        assert_eq!(FixedColumnRole::FeeBase.display_name(), "Base fee");
        assert_eq!(FixedColumnRole::FeeQuote.display_name(), "Quote fee");
        assert_eq!(FixedColumnRole::Notes.display_name(), "Notes");
    }

    #[test]
    fn display_matches_tag() {
        assert_eq!(FixedColumnRole::FeeQuote.to_string(), "feeQuote");
    }
}

// ═══════════════════════════════════════════════════════════════════
//  JournalColumnRole
// ═══════════════════════════════════════════════════════════════════

mod journal_column_role {
    use super::*;

    #[test]
    fn display_name_fixed() {
        let role = JournalColumnRole::Fixed(FixedColumnRole::BaseAmount);
        assert_eq!(role.display_name(), "Base amount");
    }

    #[test]
    fn display_name_extra_is_one_based() {
        assert_eq!(JournalColumnRole::Extra(0).display_name(), "Extra (1)");
        assert_eq!(JournalColumnRole::Extra(1).display_name(), "Extra (2)");
        assert_eq!(JournalColumnRole::Extra(10).display_name(), "Extra (11)");
    }

    #[test]
    fn display_name_propagates_over_option() {
        let role: Option<JournalColumnRole> = None;
        assert_eq!(role.map(|r| r.display_name()), None);
        let role = Some(JournalColumnRole::Extra(0));
        assert_eq!(role.map(|r| r.display_name()), Some("Extra (1)".to_string()));
    }

    #[test]
    fn serializes_fixed_roles_as_string_tags() {
        let role = JournalColumnRole::Fixed(FixedColumnRole::FeeBase);
        assert_eq!(serde_json::to_value(role).unwrap(), json!("feeBase"));
    }

    #[test]
    fn serializes_extra_roles_as_integers() {
        let role = JournalColumnRole::Extra(3);
        assert_eq!(serde_json::to_value(role).unwrap(), json!(3));
    }

    #[test]
    fn deserializes_string_tags() {
        let role: JournalColumnRole = serde_json::from_value(json!("quoteAmount")).unwrap();
        assert_eq!(role, JournalColumnRole::Fixed(FixedColumnRole::QuoteAmount));
    }

    #[test]
    fn deserializes_non_negative_integers() {
        let role: JournalColumnRole = serde_json::from_value(json!(0)).unwrap();
        assert_eq!(role, JournalColumnRole::Extra(0));
        let role: JournalColumnRole = serde_json::from_value(json!(7)).unwrap();
        assert_eq!(role, JournalColumnRole::Extra(7));
    }

    #[test]
    fn rejects_negative_indices() {
        assert!(serde_json::from_value::<JournalColumnRole>(json!(-1)).is_err());
    }

    #[test]
    fn rejects_numeric_strings() {
        assert!(serde_json::from_value::<JournalColumnRole>(json!("1")).is_err());
    }

    #[test]
    fn rejects_wrong_case_tags() {
        assert!(serde_json::from_value::<JournalColumnRole>(json!("Date")).is_err());
    }

    #[test]
    fn rejects_fractional_indices() {
        assert!(serde_json::from_value::<JournalColumnRole>(json!(1.9)).is_err());
    }

    #[test]
    fn from_fixed_role() {
        let role: JournalColumnRole = FixedColumnRole::Notes.into();
        assert_eq!(role, JournalColumnRole::Fixed(FixedColumnRole::Notes));
    }
}

// ═══════════════════════════════════════════════════════════════════
//  Column variant predicates
// ═══════════════════════════════════════════════════════════════════

mod column_predicates {
    use super::*;

    #[test]
    fn is_date_only_for_date_columns() {
        let date = date_column();
        assert!(ColumnRef::Date(&date).is_date());
        let asset = asset_column();
        assert!(!ColumnRef::Asset(&asset).is_date());
        let text = text_column();
        assert!(!ColumnRef::Text(&text).is_date());
        let integer = integer_column();
        assert!(!ColumnRef::Integer(&integer).is_date());
        let decimal = decimal_column(DecimalColumnDescription::Base);
        assert!(!ColumnRef::Decimal(&decimal).is_date());
        let boolean = boolean_column();
        assert!(!ColumnRef::Boolean(&boolean).is_date());
    }

    #[test]
    fn is_asset_only_for_asset_columns() {
        let asset = asset_column();
        assert!(ColumnRef::Asset(&asset).is_asset());
        let date = date_column();
        assert!(!ColumnRef::Date(&date).is_asset());
        let decimal = decimal_column(DecimalColumnDescription::Base);
        assert!(!ColumnRef::Decimal(&decimal).is_asset());
    }

    #[test]
    fn is_text_only_for_text_columns() {
        let text = text_column();
        assert!(ColumnRef::Text(&text).is_text());
        let integer = integer_column();
        assert!(!ColumnRef::Integer(&integer).is_text());
        let boolean = boolean_column();
        assert!(!ColumnRef::Boolean(&boolean).is_text());
    }

    #[test]
    fn is_integer_only_for_integer_columns() {
        let integer = integer_column();
        assert!(ColumnRef::Integer(&integer).is_integer());
        let text = text_column();
        assert!(!ColumnRef::Text(&text).is_integer());
    }

    #[test]
    fn is_decimal_only_for_decimal_columns() {
        let decimal = decimal_column(DecimalColumnDescription::Price);
        assert!(ColumnRef::Decimal(&decimal).is_decimal());
        let integer = integer_column();
        assert!(!ColumnRef::Integer(&integer).is_decimal());
    }

    #[test]
    fn is_boolean_only_for_boolean_columns() {
        let boolean = boolean_column();
        assert!(ColumnRef::Boolean(&boolean).is_boolean());
        let text = text_column();
        assert!(!ColumnRef::Text(&text).is_boolean());
    }

    #[test]
    fn exactly_one_variant_predicate_true_per_variant() {
        let date = date_column();
        let asset = asset_column();
        let text = text_column();
        let integer = integer_column();
        let decimal = decimal_column(DecimalColumnDescription::Base);
        let boolean = boolean_column();
        let columns = [
            ColumnRef::Date(&date),
            ColumnRef::Asset(&asset),
            ColumnRef::Text(&text),
            ColumnRef::Integer(&integer),
            ColumnRef::Decimal(&decimal),
            ColumnRef::Boolean(&boolean),
        ];
        for column in columns {
            let trues = [
                column.is_date(),
                column.is_asset(),
                column.is_text(),
                column.is_integer(),
                column.is_decimal(),
                column.is_boolean(),
            ]
            .iter()
            .filter(|&&b| b)
            .count();
            assert_eq!(trues, 1, "{column:?} matched {trues} variant predicates");
        }
    }

    #[test]
    fn decimal_description_predicates_follow_the_tag() {
        let base = decimal_column(DecimalColumnDescription::Base);
        let quote = decimal_column(DecimalColumnDescription::Quote);
        let price = decimal_column(DecimalColumnDescription::Price);

        assert!(ColumnRef::Decimal(&base).is_base_amount());
        assert!(!ColumnRef::Decimal(&base).is_quote_amount());
        assert!(!ColumnRef::Decimal(&base).is_price());

        assert!(!ColumnRef::Decimal(&quote).is_base_amount());
        assert!(ColumnRef::Decimal(&quote).is_quote_amount());
        assert!(!ColumnRef::Decimal(&quote).is_price());

        assert!(!ColumnRef::Decimal(&price).is_base_amount());
        assert!(!ColumnRef::Decimal(&price).is_quote_amount());
        assert!(ColumnRef::Decimal(&price).is_price());
    }

    #[test]
    fn decimal_description_predicates_false_for_other_variants() {
        let date = date_column();
        assert!(!ColumnRef::Date(&date).is_base_amount());
        assert!(!ColumnRef::Date(&date).is_quote_amount());
        assert!(!ColumnRef::Date(&date).is_price());
        let text = text_column();
        assert!(!ColumnRef::Text(&text).is_base_amount());
    }

    #[test]
    fn decimal_description_predicates_exhaustive_over_decimals() {
        for description in [
            DecimalColumnDescription::Base,
            DecimalColumnDescription::Quote,
            DecimalColumnDescription::Price,
        ] {
            let column = decimal_column(description);
            let column = ColumnRef::Decimal(&column);
            let trues = [
                column.is_base_amount(),
                column.is_quote_amount(),
                column.is_price(),
            ]
            .iter()
            .filter(|&&b| b)
            .count();
            assert_eq!(trues, 1);
        }
    }

    #[test]
    fn is_extra_true_for_the_four_extra_legal_variants() {
        let text = text_column();
        let integer = integer_column();
        let decimal = decimal_column(DecimalColumnDescription::Base);
        let boolean = boolean_column();
        assert!(ColumnRef::Text(&text).is_extra());
        assert!(ColumnRef::Integer(&integer).is_extra());
        assert!(ColumnRef::Decimal(&decimal).is_extra());
        assert!(ColumnRef::Boolean(&boolean).is_extra());
    }

    #[test]
    fn is_extra_false_for_date_and_asset() {
        let date = date_column();
        let asset = asset_column();
        assert!(!ColumnRef::Date(&date).is_extra());
        assert!(!ColumnRef::Asset(&asset).is_extra());
    }

    #[test]
    fn name_and_hide_accessors() {
        let mut decimal = decimal_column(DecimalColumnDescription::Base);
        decimal.hide = true;
        let column = ColumnRef::Decimal(&decimal);
        assert_eq!(column.name(), "Decimal");
        assert!(column.hide());
    }

    #[test]
    fn as_decimal() {
        let decimal = decimal_column(DecimalColumnDescription::Quote);
        assert!(ColumnRef::Decimal(&decimal).as_decimal().is_some());
        let text = text_column();
        assert!(ColumnRef::Text(&text).as_decimal().is_none());
    }
}

// ═══════════════════════════════════════════════════════════════════
//  ExtraColumn
// ═══════════════════════════════════════════════════════════════════

mod extra_column {
    use super::*;

    #[test]
    fn name_and_hide_delegate_to_the_variant() {
        let column = ExtraColumn::Integer(IntegerColumn { name: "Lot".into(), hide: true });
        assert_eq!(column.name(), "Lot");
        assert!(column.hide());
    }

    #[test]
    fn as_ref_preserves_the_variant() {
        assert!(ExtraColumn::Text(text_column()).as_ref().is_text());
        assert!(ExtraColumn::Integer(integer_column()).as_ref().is_integer());
        assert!(ExtraColumn::Decimal(decimal_column(DecimalColumnDescription::Base))
            .as_ref()
            .is_decimal());
        assert!(ExtraColumn::Boolean(boolean_column()).as_ref().is_boolean());
    }

    #[test]
    fn every_extra_column_is_extra() {
        assert!(ExtraColumn::Text(text_column()).as_ref().is_extra());
        assert!(ExtraColumn::Boolean(boolean_column()).as_ref().is_extra());
    }

    #[test]
    fn serde_tags_the_variant_with_type() {
        let value = serde_json::to_value(ExtraColumn::Text(text_column())).unwrap();
        assert_eq!(value["type"], json!("text"));
        let value = serde_json::to_value(ExtraColumn::Boolean(boolean_column())).unwrap();
        assert_eq!(value["type"], json!("boolean"));
    }

    #[test]
    fn serde_roundtrip() {
        let column = ExtraColumn::Decimal(DecimalColumn::new(
            "Fee rate",
            DecimalColumnDescription::Quote,
        ));
        let text = serde_json::to_string(&column).unwrap();
        let back: ExtraColumn = serde_json::from_str(&text).unwrap();
        assert_eq!(column, back);
    }

    #[test]
    fn serde_rejects_date_as_extra() {
        let result: Result<ExtraColumn, _> = serde_json::from_value(json!({
            "type": "date",
            "name": "When",
            "hide": false,
            "format": "date",
        }));
        assert!(result.is_err());
    }

    #[test]
    fn serde_rejects_asset_as_extra() {
        let result: Result<ExtraColumn, _> = serde_json::from_value(json!({
            "type": "asset",
            "name": "Which",
            "hide": false,
        }));
        assert!(result.is_err());
    }
}

// ═══════════════════════════════════════════════════════════════════
//  JournalColumnSet
// ═══════════════════════════════════════════════════════════════════

mod column_set {
    use super::*;

    #[test]
    fn trading_template_names() {
        let columns = JournalColumnSet::trading(DateTimeFormat::Date);
        assert_eq!(columns.date.name, "Date");
        assert_eq!(columns.base.name, "Asset");
        assert_eq!(columns.base_amount.name, "Amount");
        assert_eq!(columns.quote.name, "Quote");
        assert_eq!(columns.quote_amount.name, "Total");
        assert_eq!(columns.price.name, "Price");
        assert_eq!(columns.fee_base.name, "Fee (Base)");
        assert_eq!(columns.fee_quote.name, "Fee");
        assert_eq!(columns.notes.name, "Notes");
    }

    #[test]
    fn trading_template_hides_quote_and_base_fee() {
        let columns = JournalColumnSet::trading(DateTimeFormat::Date);
        assert!(columns.quote.hide);
        assert!(columns.fee_base.hide);
        assert!(!columns.date.hide);
        assert!(!columns.base.hide);
        assert!(!columns.base_amount.hide);
        assert!(!columns.quote_amount.hide);
        assert!(!columns.price.hide);
        assert!(!columns.fee_quote.hide);
        assert!(!columns.notes.hide);
    }

    #[test]
    fn income_template_also_hides_quote_fee() {
        let columns = JournalColumnSet::income(DateTimeFormat::Date);
        assert!(columns.quote.hide);
        assert!(columns.fee_base.hide);
        assert!(columns.fee_quote.hide);
        assert!(!columns.base_amount.hide);
    }

    #[test]
    fn expense_template_matches_income() {
        assert_eq!(
            JournalColumnSet::expense(DateTimeFormat::Date),
            JournalColumnSet::income(DateTimeFormat::Date),
        );
    }

    #[test]
    fn templates_carry_the_requested_date_format() {
        let columns = JournalColumnSet::trading(DateTimeFormat::DateTime);
        assert_eq!(columns.date.format, DateTimeFormat::DateTime);
    }

    #[test]
    fn decimal_descriptions_are_fixed_by_position() {
        let columns = JournalColumnSet::trading(DateTimeFormat::Date);
        assert_eq!(columns.base_amount.description, DecimalColumnDescription::Base);
        assert_eq!(columns.quote_amount.description, DecimalColumnDescription::Quote);
        assert_eq!(columns.price.description, DecimalColumnDescription::Price);
        assert_eq!(columns.fee_base.description, DecimalColumnDescription::Base);
        assert_eq!(columns.fee_quote.description, DecimalColumnDescription::Quote);
    }

    #[test]
    fn precision_overrides_start_empty() {
        let columns = JournalColumnSet::trading(DateTimeFormat::Date);
        assert!(columns.base_amount.precision.is_empty());
        assert!(columns.price.precision.is_empty());
    }

    #[test]
    fn column_lookup_covers_every_fixed_role() {
        let columns = JournalColumnSet::trading(DateTimeFormat::Date);
        for role in FixedColumnRole::ALL {
            let column = columns.column(JournalColumnRole::Fixed(role));
            assert!(column.is_some(), "missing column for {role}");
        }
    }

    #[test]
    fn column_lookup_matches_declared_variants() {
        let columns = JournalColumnSet::trading(DateTimeFormat::Date);
        let lookup = |role| columns.column(JournalColumnRole::Fixed(role)).unwrap();
        assert!(lookup(FixedColumnRole::Date).is_date());
        assert!(lookup(FixedColumnRole::Base).is_asset());
        assert!(lookup(FixedColumnRole::BaseAmount).is_base_amount());
        assert!(lookup(FixedColumnRole::Quote).is_asset());
        assert!(lookup(FixedColumnRole::QuoteAmount).is_quote_amount());
        assert!(lookup(FixedColumnRole::Price).is_price());
        assert!(lookup(FixedColumnRole::FeeBase).is_base_amount());
        assert!(lookup(FixedColumnRole::FeeQuote).is_quote_amount());
        assert!(lookup(FixedColumnRole::Notes).is_text());
    }

    #[test]
    fn column_lookup_finds_extra_columns() {
        let mut columns = JournalColumnSet::trading(DateTimeFormat::Date);
        columns.extra.push(ExtraColumn::Text(TextColumn::new("Exchange")));
        let column = columns.column(JournalColumnRole::Extra(0)).unwrap();
        assert!(column.is_text());
        assert_eq!(column.name(), "Exchange");
    }

    #[test]
    fn column_lookup_out_of_range_extra_is_none() {
        let columns = JournalColumnSet::trading(DateTimeFormat::Date);
        assert!(columns.column(JournalColumnRole::Extra(0)).is_none());
        let mut columns = columns;
        columns.extra.push(ExtraColumn::Text(TextColumn::new("Exchange")));
        assert!(columns.column(JournalColumnRole::Extra(1)).is_none());
    }

    #[test]
    fn roles_lists_fixed_then_extras() {
        let mut columns = JournalColumnSet::trading(DateTimeFormat::Date);
        columns.extra.push(ExtraColumn::Text(TextColumn::new("Exchange")));
        columns.extra.push(ExtraColumn::Boolean(BooleanColumn::new("Settled")));
        let roles = columns.roles();
        assert_eq!(roles.len(), 11);
        assert_eq!(roles[0], JournalColumnRole::Fixed(FixedColumnRole::Date));
        assert_eq!(roles[8], JournalColumnRole::Fixed(FixedColumnRole::Notes));
        assert_eq!(roles[9], JournalColumnRole::Extra(0));
        assert_eq!(roles[10], JournalColumnRole::Extra(1));
    }

    #[test]
    fn rename_fixed_column() {
        let mut columns = JournalColumnSet::trading(DateTimeFormat::Date);
        assert!(columns.rename(JournalColumnRole::Fixed(FixedColumnRole::BaseAmount), "Qty"));
        assert_eq!(columns.base_amount.name, "Qty");
    }

    #[test]
    fn rename_extra_column() {
        let mut columns = JournalColumnSet::trading(DateTimeFormat::Date);
        columns.extra.push(ExtraColumn::Text(TextColumn::new("Exchange")));
        assert!(columns.rename(JournalColumnRole::Extra(0), "Venue"));
        assert_eq!(columns.extra[0].name(), "Venue");
    }

    #[test]
    fn rename_out_of_range_extra_fails() {
        let mut columns = JournalColumnSet::trading(DateTimeFormat::Date);
        assert!(!columns.rename(JournalColumnRole::Extra(2), "Nope"));
    }

    #[test]
    fn set_hidden_toggles() {
        let mut columns = JournalColumnSet::trading(DateTimeFormat::Date);
        assert!(columns.set_hidden(JournalColumnRole::Fixed(FixedColumnRole::Quote), false));
        assert!(!columns.quote.hide);
        assert!(columns.set_hidden(JournalColumnRole::Fixed(FixedColumnRole::Quote), true));
        assert!(columns.quote.hide);
    }

    #[test]
    fn decimal_mut_only_for_decimal_roles() {
        let mut columns = JournalColumnSet::trading(DateTimeFormat::Date);
        assert!(columns
            .decimal_mut(JournalColumnRole::Fixed(FixedColumnRole::Price))
            .is_some());
        assert!(columns
            .decimal_mut(JournalColumnRole::Fixed(FixedColumnRole::Notes))
            .is_none());
        assert!(columns
            .decimal_mut(JournalColumnRole::Fixed(FixedColumnRole::Date))
            .is_none());
    }
}

// ═══════════════════════════════════════════════════════════════════
//  Journal
// ═══════════════════════════════════════════════════════════════════

mod journal {
    use super::*;

    #[test]
    fn new_journal_orders_the_nine_fixed_roles() {
        let journal = Journal::trading("Trading");
        let expected: Vec<JournalColumnRole> = FixedColumnRole::ALL
            .into_iter()
            .map(JournalColumnRole::Fixed)
            .collect();
        assert_eq!(journal.column_order, expected);
    }

    #[test]
    fn new_journal_has_no_transactions() {
        assert!(Journal::trading("Trading").transactions.is_empty());
    }

    #[test]
    fn journal_type_matches_constructor() {
        assert_eq!(Journal::trading("A").journal_type, JournalType::Trading);
        assert_eq!(Journal::income("B").journal_type, JournalType::Income);
        assert_eq!(Journal::expense("C").journal_type, JournalType::Expense);
    }

    #[test]
    fn income_journal_uses_income_columns() {
        let journal = Journal::income("Salary");
        assert!(journal.columns.fee_quote.hide);
    }

    #[test]
    fn column_delegates_to_the_set() {
        let journal = Journal::trading("Trading");
        let column = journal
            .column(JournalColumnRole::Fixed(FixedColumnRole::Price))
            .unwrap();
        assert!(column.is_price());
    }
}

// ═══════════════════════════════════════════════════════════════════
//  Transaction & ExtraValue
// ═══════════════════════════════════════════════════════════════════

mod transaction {
    use super::*;

    #[test]
    fn new_has_no_fees_notes_or_extras() {
        let t = Transaction::new("2021-01-01", "BTC", dec!(1), "USD", dec!(-50000));
        assert_eq!(t.fee_base, dec!(0));
        assert_eq!(t.fee_quote, dec!(0));
        assert_eq!(t.notes, "");
        assert!(t.extra.is_empty());
    }

    #[test]
    fn transaction_type_reads_the_signs() {
        let t = Transaction::new("2021-01-01", "BTC", dec!(1), "USD", dec!(-50000));
        assert_eq!(t.transaction_type(TransactionType::Expense), TransactionType::Buy);
    }

    #[test]
    fn serde_uses_contract_field_names() {
        let t = Transaction::new("2021-01-01", "BTC", dec!(1), "USD", dec!(-50000));
        let value = serde_json::to_value(&t).unwrap();
        let object = value.as_object().unwrap();
        for field in ["date", "base", "baseAmount", "quote", "quoteAmount", "feeBase", "feeQuote", "notes", "extra"] {
            assert!(object.contains_key(field), "missing field {field}");
        }
    }

    #[test]
    fn serde_roundtrip_preserves_amount_signs() {
        let mut t = Transaction::new("2021-01-01", "BTC", dec!(1), "USD", dec!(-50000));
        t.fee_quote = dec!(8);
        let text = serde_json::to_string(&t).unwrap();
        let back: Transaction = serde_json::from_str(&text).unwrap();
        assert_eq!(t, back);
    }

    #[test]
    fn extra_values_roundtrip_with_index_keys() {
        let mut t = Transaction::new("2021-01-01", "BTC", dec!(1), "USD", dec!(-50000));
        t.extra.insert(0, ExtraValue::Text("Kraken".into()));
        t.extra.insert(2, ExtraValue::Boolean(true));
        let text = serde_json::to_string(&t).unwrap();
        let back: Transaction = serde_json::from_str(&text).unwrap();
        assert_eq!(back.extra.get(&0), Some(&ExtraValue::Text("Kraken".into())));
        assert_eq!(back.extra.get(&2), Some(&ExtraValue::Boolean(true)));
    }
}

mod extra_value {
    use super::*;

    #[test]
    fn booleans_stay_booleans() {
        let value: ExtraValue = serde_json::from_value(json!(true)).unwrap();
        assert_eq!(value, ExtraValue::Boolean(true));
    }

    #[test]
    fn whole_numbers_become_integers() {
        let value: ExtraValue = serde_json::from_value(json!(42)).unwrap();
        assert_eq!(value, ExtraValue::Integer(42));
    }

    #[test]
    fn fractional_numbers_become_decimals() {
        let value: ExtraValue = serde_json::from_value(json!(2.5)).unwrap();
        assert_eq!(value, ExtraValue::Decimal(dec!(2.5)));
    }

    #[test]
    fn text_stays_text() {
        let value: ExtraValue = serde_json::from_value(json!("NYSE")).unwrap();
        assert_eq!(value, ExtraValue::Text("NYSE".into()));
    }

    #[test]
    fn roundtrip() {
        for value in [
            ExtraValue::Boolean(false),
            ExtraValue::Integer(-3),
            ExtraValue::Text("memo".into()),
        ] {
            let text = serde_json::to_string(&value).unwrap();
            let back: ExtraValue = serde_json::from_str(&text).unwrap();
            assert_eq!(value, back);
        }
    }
}

// ═══════════════════════════════════════════════════════════════════
//  TransactionType & FeeCurrency display
// ═══════════════════════════════════════════════════════════════════

mod transaction_type_display {
    use super::*;

    #[test]
    fn display_tags() {
        assert_eq!(TransactionType::Buy.to_string(), "buy");
        assert_eq!(TransactionType::Sell.to_string(), "sell");
        assert_eq!(TransactionType::Income.to_string(), "income");
        assert_eq!(TransactionType::Expense.to_string(), "expense");
    }

    #[test]
    fn fee_currency_display() {
        assert_eq!(FeeCurrency::Base.to_string(), "base");
        assert_eq!(FeeCurrency::Quote.to_string(), "quote");
    }

    #[test]
    fn serde_rejects_wrong_case() {
        assert!(serde_json::from_value::<TransactionType>(json!("Buy")).is_err());
    }
}

// ═══════════════════════════════════════════════════════════════════
//  Asset / AccountSettings / Account
// ═══════════════════════════════════════════════════════════════════

mod asset {
    use super::*;

    #[test]
    fn new_leaves_symbol_empty() {
        let asset = Asset::new("ETH", "Ethereum", 18, 2, false);
        assert_eq!(asset.symbol, None);
    }

    #[test]
    fn with_symbol() {
        let asset = Asset::with_symbol("BTC", "Bitcoin", 8, 2, true, "₿");
        assert_eq!(asset.symbol.as_deref(), Some("₿"));
    }

    #[test]
    fn find_is_exact_on_ticker() {
        let assets = vec![Asset::new("BTC", "Bitcoin", 8, 2, true)];
        assert!(Asset::find(&assets, "BTC").is_some());
        assert!(Asset::find(&assets, "btc").is_none());
        assert!(Asset::find(&assets, "").is_none());
        assert!(Asset::find(&assets, "ETH").is_none());
    }

    #[test]
    fn serde_uses_contract_field_names() {
        let asset = Asset::new("BTC", "Bitcoin", 8, 2, true);
        let value = serde_json::to_value(&asset).unwrap();
        let object = value.as_object().unwrap();
        assert!(object.contains_key("pricePrecision"));
        assert!(object.contains_key("isCurrency"));
        assert!(!object.contains_key("symbol"), "absent symbol must be omitted");
    }

    #[test]
    fn serde_roundtrip() {
        let asset = Asset::with_symbol("PLN", "Złoty", 2, 4, true, "zł");
        let text = serde_json::to_string(&asset).unwrap();
        let back: Asset = serde_json::from_str(&text).unwrap();
        assert_eq!(asset, back);
    }
}

mod account {
    use super::*;

    #[test]
    fn default_settings_use_usd() {
        let settings = AccountSettings::default();
        assert_eq!(settings.accounting_currency.ticker, "USD");
        assert_eq!(settings.accounting_currency.precision, 2);
        assert_eq!(settings.accounting_currency.price_precision, 4);
        assert!(settings.accounting_currency.is_currency);
    }

    #[test]
    fn new_account_is_empty() {
        let account = Account::new("Personal");
        assert!(account.assets.is_empty());
        assert!(account.journals.is_empty());
    }

    #[test]
    fn with_defaults_seeds_btc_and_two_journals() {
        let account = Account::with_defaults("Personal");
        assert_eq!(account.assets.len(), 1);
        assert_eq!(account.assets[0].ticker, "BTC");
        assert_eq!(account.assets[0].precision, 8);
        assert_eq!(account.journals.len(), 2);
        assert_eq!(account.journals[0].name, "Trading");
        assert_eq!(account.journals[0].journal_type, JournalType::Trading);
        assert_eq!(account.journals[1].name, "Misc fees");
        assert_eq!(account.journals[1].journal_type, JournalType::Expense);
    }

    #[test]
    fn default_journals_start_empty() {
        let account = Account::with_defaults("Personal");
        assert!(account.journals.iter().all(|j| j.transactions.is_empty()));
    }

    #[test]
    fn find_asset() {
        let account = Account::with_defaults("Personal");
        assert!(account.find_asset("BTC").is_some());
        assert!(account.find_asset("USD").is_none());
        assert!(account.find_asset("").is_none());
    }
}
