//! Table resolution and field mapping step definitions.

use cucumber::gherkin::Step;
use cucumber::{given, then, when, World};
use fineract_client::models::PostLoansLoanIdTransactionsRequest;
use fineract_e2e::mapper::{apply_additional_fields, FieldStatus, MappingReport};
use fineract_e2e::table::{RowTable, ValueResolver};

use super::{request_field, table_rows};

/// Test context for field mapping scenarios.
#[derive(Debug, World)]
#[world(init = Self::new)]
pub struct FieldMappingWorld {
    table: RowTable,
    request: PostLoansLoanIdTransactionsRequest,
    report: MappingReport,
}

impl FieldMappingWorld {
    fn new() -> Self {
        Self {
            table: RowTable::default(),
            request: PostLoansLoanIdTransactionsRequest::new(),
            report: MappingReport::default(),
        }
    }

    fn apply(&mut self, excluded: &[&str]) {
        let fields = self.table.field_map();
        self.report = apply_additional_fields(&mut self.request, &fields, excluded);
    }
}

#[given("the following data table:")]
async fn given_data_table(world: &mut FieldMappingWorld, step: &Step) {
    world.table = RowTable::from_rows(&table_rows(step)).expect("two-row table");
}

#[when("the additional fields are applied")]
async fn when_fields_applied(world: &mut FieldMappingWorld) {
    world.apply(&[]);
}

#[when(expr = "the additional fields are applied excluding {string}")]
async fn when_fields_applied_excluding(world: &mut FieldMappingWorld, excluded: String) {
    let excluded: Vec<&str> = excluded.split(',').map(str::trim).collect();
    world.apply(&excluded);
}

#[then(expr = "the request field {string} is {string}")]
async fn then_request_field_is(world: &mut FieldMappingWorld, field: String, expected: String) {
    assert_eq!(
        request_field(&world.request, &field).as_deref(),
        Some(expected.as_str()),
        "field {field}"
    );
}

#[then(expr = "the request field {string} is not set")]
async fn then_request_field_not_set(world: &mut FieldMappingWorld, field: String) {
    assert_eq!(request_field(&world.request, &field), None, "field {field}");
}

#[then(expr = "the column {string} is reported as {word}")]
async fn then_column_reported_as(world: &mut FieldMappingWorld, column: String, status: String) {
    let actual = world
        .report
        .status(&column)
        .unwrap_or_else(|| panic!("no outcome for column {column}"));
    let matches = match status.as_str() {
        "applied" => matches!(actual, FieldStatus::Applied(_)),
        "excluded" => matches!(actual, FieldStatus::Excluded),
        "unset" => matches!(actual, FieldStatus::Unset),
        "skipped" => matches!(actual, FieldStatus::Skipped(_)),
        other => panic!("unknown status {other}"),
    };
    assert!(matches, "column {column}: expected {status}, got {actual:?}");
}

#[then(expr = "{int} column(s) is/are reported")]
async fn then_columns_reported(world: &mut FieldMappingWorld, count: usize) {
    assert_eq!(world.report.len(), count);
}

#[then(expr = "resolving {string} at column {int} gives {string}")]
async fn then_resolving_gives(
    world: &mut FieldMappingWorld,
    name: String,
    index: usize,
    expected: String,
) {
    let fields = world.table.field_map();
    let resolver = ValueResolver::new(&fields, world.table.values());
    assert_eq!(resolver.resolve(index, &name), Some(expected.as_str()));
}

#[then(expr = "resolving {string} at column {int} gives nothing")]
async fn then_resolving_gives_nothing(world: &mut FieldMappingWorld, name: String, index: usize) {
    let fields = world.table.field_map();
    let resolver = ValueResolver::new(&fields, world.table.values());
    assert_eq!(resolver.resolve(index, &name), None);
}
