use maud::{Markup, html};

use super::{base, format_money};
use crate::db::models::{Category, EntryFilter, LedgerEntry};
use crate::forms::{EntryForm, FormErrors, MEMO_MAX_CHARS};
use crate::router::{ENTRIES_VIEW, NEW_ENTRY_VIEW, delete_entry_path, edit_entry_path};

pub fn list_view(entries: &[LedgerEntry], categories: &[Category], filter: &EntryFilter) -> Markup {
    let from = filter.from.map(|d| d.to_string()).unwrap_or_default();
    let to = filter.to.map(|d| d.to_string()).unwrap_or_default();

    base(
        "Ledger entries",
        html! {
            form method="get" action=(ENTRIES_VIEW) {
                label { "From " input type="date" name="from" value=(from); }
                " "
                label { "To " input type="date" name="to" value=(to); }
                " "
                label {
                    "Category "
                    select name="category" {
                        option value="" { "All" }
                        @for c in categories {
                            option value=(c.id) selected[filter.category_id == Some(c.id)] {
                                (c.category_name)
                            }
                        }
                    }
                }
                " "
                button type="submit" { "Filter" }
            }
            p { a href=(NEW_ENTRY_VIEW) { "Add an entry" } }
            @if entries.is_empty() {
                p { "No entries recorded." }
            } @else {
                table {
                    thead {
                        tr { th { "Date" } th { "Category" } th { "Amount" } th { "Memo" } th {} }
                    }
                    tbody {
                        @for e in entries {
                            tr {
                                td { (e.date.to_string()) }
                                td { (e.category_name) }
                                td.money { (format_money(e.money)) }
                                td { (e.memo) }
                                td {
                                    a href=(edit_entry_path(e.id)) { "Edit" }
                                    " "
                                    a href=(delete_entry_path(e.id)) { "Delete" }
                                }
                            }
                        }
                    }
                }
            }
        },
    )
}

fn field_errors(errors: &FormErrors, field: &str) -> Markup {
    let messages = errors.field(field);
    html! {
        @if !messages.is_empty() {
            ul.errorlist {
                @for m in messages { li { (m) } }
            }
        }
    }
}

/// The create/edit form. `action` is the URL the form posts back to.
pub fn form_view(
    title: &str,
    action: &str,
    form: &EntryForm,
    errors: &FormErrors,
    categories: &[Category],
) -> Markup {
    base(
        title,
        html! {
            form method="post" action=(action) {
                p {
                    label for="id_date" { "Date" }
                    (field_errors(errors, "date"))
                    input #id_date type="date" name="date" required value=(form.date);
                }
                p {
                    label for="id_category" { "Category" }
                    (field_errors(errors, "category"))
                    select #id_category name="category" required {
                        option value="" { "---------" }
                        @for c in categories {
                            option value=(c.id) selected[form.category == c.id.to_string()] {
                                (c.category_name)
                            }
                        }
                    }
                }
                p {
                    label for="id_money" { "Amount" }
                    (field_errors(errors, "money"))
                    input #id_money type="number" name="money" step="1" required value=(form.money);
                }
                p {
                    label for="id_memo" { "Memo" }
                    (field_errors(errors, "memo"))
                    textarea #id_memo name="memo" maxlength=(MEMO_MAX_CHARS) { (form.memo) }
                }
                button type="submit" { "Save" }
                " "
                a href=(ENTRIES_VIEW) { "Cancel" }
            }
        },
    )
}

pub fn delete_view(entry: &LedgerEntry) -> Markup {
    base(
        "Delete entry",
        html! {
            p { "Delete this entry?" }
            dl {
                dt { "Date" } dd { (entry.date.to_string()) }
                dt { "Category" } dd { (entry.category_name) }
                dt { "Amount" } dd { (format_money(entry.money)) }
                dt { "Memo" } dd { (entry.memo) }
            }
            form method="post" action=(delete_entry_path(entry.id)) {
                button type="submit" { "Delete" }
                " "
                a href=(ENTRIES_VIEW) { "Cancel" }
            }
        },
    )
}

pub fn done_view(title: &str, message: &str) -> Markup {
    base(
        title,
        html! {
            p { (message) }
            p { a href=(ENTRIES_VIEW) { "Back to the list" } }
        },
    )
}
