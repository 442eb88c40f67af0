//! Minimal HTML shims. Proper templating is an external concern; these
//! exist so handlers have something concrete to render.

use axum::response::Html;
use percent_encoding::{NON_ALPHANUMERIC, utf8_percent_encode};

use crate::db::models::{Credential, SurveyRecord, TransactionRecord};

pub fn landing_page() -> Html<&'static str> {
    Html(
        "<!doctype html><html><head><title>BudgetBuddy</title></head><body>\
         <h1>BudgetBuddy</h1>\
         <nav><a href=\"/register\">Register</a> | <a href=\"/login\">Login</a> | \
         <a href=\"/transaction\">Record transaction</a> | \
         <a href=\"/viewTransactions\">My transactions</a> | \
         <a href=\"/logout\">Logout</a></nav>\
         </body></html>",
    )
}

pub fn register_page() -> Html<&'static str> {
    Html(
        "<!doctype html><html><head><title>Register</title></head><body>\
         <h1>Register</h1>\
         <form method=\"post\" action=\"/register\">\
         <input name=\"identifier\" placeholder=\"email\">\
         <input name=\"password\" type=\"password\">\
         <input name=\"first_name\" placeholder=\"first name\">\
         <input name=\"last_name\" placeholder=\"last name\">\
         <input name=\"income_id\" placeholder=\"income bracket\">\
         <button type=\"submit\">Register</button>\
         </form></body></html>",
    )
}

pub fn login_page() -> Html<&'static str> {
    Html(
        "<!doctype html><html><head><title>Login</title></head><body>\
         <h1>Login</h1>\
         <form method=\"post\" action=\"/login\">\
         <input name=\"identifier\" placeholder=\"email\">\
         <input name=\"password\" type=\"password\">\
         <button type=\"submit\">Login</button>\
         </form></body></html>",
    )
}

pub fn transaction_page() -> Html<&'static str> {
    Html(
        "<!doctype html><html><head><title>Record transaction</title></head><body>\
         <h1>Record a transaction</h1>\
         <form method=\"post\" action=\"/transaction\">\
         <input name=\"transactionType\" placeholder=\"type id\">\
         <input name=\"expenseAmount\" placeholder=\"amount\">\
         <button type=\"submit\">Save</button>\
         </form></body></html>",
    )
}

pub fn transactions_page(records: &[TransactionRecord]) -> Html<String> {
    let mut rows = String::new();
    for r in records {
        rows.push_str(&format!(
            "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{:.2}</td></tr>",
            r.transaction_id,
            escape(&r.first_name),
            escape(&r.last_name),
            escape(&r.transaction_category),
            r.amount,
        ));
    }
    Html(format!(
        "<!doctype html><html><head><title>Transactions</title></head><body>\
         <h1>Your transactions</h1>\
         <table><tr><th>Id</th><th>First</th><th>Last</th><th>Category</th><th>Amount</th></tr>\
         {rows}</table></body></html>"
    ))
}

pub fn accounts_page(accounts: &[Credential]) -> Html<String> {
    let mut rows = String::new();
    for account in accounts {
        rows.push_str(&format!(
            "<tr><td>{id}</td><td>\
             <form method=\"post\" action=\"/deleteUser/{segment}\">\
             <button type=\"submit\">Delete</button></form></td></tr>",
            id = escape(&account.identifier),
            segment = path_segment(&account.identifier),
        ));
    }
    Html(format!(
        "<!doctype html><html><head><title>Accounts</title></head><body>\
         <h1>Registered accounts</h1>\
         <table><tr><th>Identifier</th><th></th></tr>{rows}</table></body></html>"
    ))
}

pub fn survey_page(records: &[SurveyRecord]) -> Html<String> {
    let mut rows = String::new();
    for r in records {
        rows.push_str(&format!(
            "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{:.1}</td>\
             <td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>",
            r.user_id,
            r.age,
            escape(&r.gender),
            escape(&r.relationship_status),
            escape(&r.occupation_status),
            r.daily_hours,
            r.distraction_rating,
            r.anxiety_rating,
            r.depression_rating,
            r.sleep_rating,
            escape(&r.platform),
            escape(&r.organization),
        ));
    }
    Html(format!(
        "<!doctype html><html><head><title>Survey results</title></head><body>\
         <h1>Survey results</h1>\
         <table><tr><th>User</th><th>Age</th><th>Gender</th><th>Relationship</th>\
         <th>Occupation</th><th>Hours/day</th><th>Distraction</th><th>Anxiety</th>\
         <th>Depression</th><th>Sleep</th><th>Platform</th><th>Organization</th></tr>\
         {rows}</table></body></html>"
    ))
}

fn escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

/// Identifiers go into the delete form's action as one path segment, so
/// reserved characters like `/` and `?` must not survive literally.
fn path_segment(s: &str) -> String {
    utf8_percent_encode(s, NON_ALPHANUMERIC).to_string()
}
