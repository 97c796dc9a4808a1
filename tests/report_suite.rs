use chrono::NaiveDate;
use sitebook_core::{
    core::services::ReportService,
    domain::{
        Client, CompanyBooks, EntryKind, LaborExpense, LaborPaymentReceived, LedgerEntry,
        OfficeExpense, Project, Vendor,
    },
    report::{
        category_totals, filter_range, site_totals, summarize, trend_series, unify,
        with_running_balance, DateRange, Granularity,
    },
};
use uuid::Uuid;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn books_with_project(project_name: &str) -> (CompanyBooks, Uuid, Uuid) {
    let mut books = CompanyBooks::new("Acme Constructions");
    let client_id = books.add_client(Client::new("Mr. Rao"));
    let project_id = books.add_project(Project::new(project_name, client_id));
    (books, client_id, project_id)
}

#[test]
fn single_credit_drives_balance_and_site_income() {
    let (mut books, _, project_id) = books_with_project("P");
    books.add_entry(LedgerEntry::new(
        EntryKind::Credit,
        1000.0,
        "Advance",
        date(2024, 1, 1),
        project_id,
    ));

    let records = unify(&books);
    let rows = with_running_balance(records.clone());
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].balance, 1000.0);

    let sites = site_totals(&records);
    assert_eq!(sites.len(), 1);
    assert_eq!(sites[0].site, "P");
    assert_eq!(sites[0].income, 1000.0);
}

#[test]
fn credit_then_debit_produces_ascending_balances() {
    let (mut books, _, project_id) = books_with_project("P");
    books.add_entry(LedgerEntry::new(
        EntryKind::Credit,
        5000.0,
        "Advance",
        date(2024, 1, 5),
        project_id,
    ));
    books.add_entry(LedgerEntry::new(
        EntryKind::Debit,
        2000.0,
        "Materials",
        date(2024, 1, 10),
        project_id,
    ));

    let records = unify(&books);
    let balances: Vec<f64> = with_running_balance(records.clone())
        .iter()
        .map(|row| row.balance)
        .collect();
    assert_eq!(balances, vec![5000.0, 3000.0]);
    assert_eq!(summarize(&records).net, 3000.0);
}

#[test]
fn unpaid_office_expense_hits_category_unpaid_and_net() {
    let mut books = CompanyBooks::new("Acme");
    books.add_office_expense(
        OfficeExpense::new("Office rent", 500.0, date(2024, 2, 1))
            .with_category("Rent")
            .unpaid(),
    );

    let records = unify(&books);
    let categories = category_totals(&records);
    assert_eq!(categories.len(), 1);
    assert_eq!(categories[0].category, "Rent");
    assert_eq!(categories[0].total, 500.0);

    let totals = summarize(&records);
    assert_eq!(totals.unpaid, 500.0);
    assert_eq!(totals.net, -500.0);
}

#[test]
fn site_totals_combine_labor_expense_and_payment() {
    let (mut books, client_id, project_id) = books_with_project("S1");
    books.add_labor_expense(
        LaborExpense::new("Mason crew", 300.0, date(2024, 3, 10)).on_site(project_id),
    );
    books.add_labor_payment(
        LaborPaymentReceived::new(800.0, "Labor recovery", date(2024, 3, 12))
            .from_client(client_id)
            .for_project(project_id),
    );

    let records = unify(&books);
    let sites = site_totals(&records);
    let s1 = sites.iter().find(|row| row.site == "S1").expect("site row");
    assert_eq!(s1.income, 800.0);
    assert_eq!(s1.expense, 300.0);
    assert_eq!(s1.net(), 500.0);
}

#[test]
fn monthly_buckets_merge_and_sort_ascending() {
    let (mut books, _, project_id) = books_with_project("P");
    for (day, amount) in [(15, 100.0), (20, 50.0)] {
        books.add_entry(LedgerEntry::new(
            EntryKind::Credit,
            amount,
            "Jan",
            date(2024, 1, day),
            project_id,
        ));
    }
    books.add_entry(LedgerEntry::new(
        EntryKind::Credit,
        75.0,
        "Feb",
        date(2024, 2, 1),
        project_id,
    ));

    let records = unify(&books);
    let buckets = trend_series(&records, Granularity::Month, None);
    assert_eq!(buckets.len(), 2);
    assert_eq!(buckets[0].label, "Jan 2024");
    assert_eq!(buckets[0].income, 150.0);
    assert_eq!(buckets[1].label, "Feb 2024");
    assert_eq!(buckets[1].income, 75.0);
}

#[test]
fn every_transaction_lands_in_exactly_one_bucket() {
    let (mut books, _, project_id) = books_with_project("P");
    for month in 1..=6 {
        books.add_entry(LedgerEntry::new(
            EntryKind::Credit,
            10.0,
            "in",
            date(2024, month, 3),
            project_id,
        ));
        books.add_entry(LedgerEntry::new(
            EntryKind::Debit,
            4.0,
            "out",
            date(2024, month, 20),
            project_id,
        ));
    }

    let records = unify(&books);
    let totals = summarize(&records);
    for granularity in [
        Granularity::Day,
        Granularity::Week,
        Granularity::Month,
        Granularity::Quarter,
        Granularity::Year,
    ] {
        let buckets = trend_series(&records, granularity, None);
        let income: f64 = buckets.iter().map(|b| b.income).sum();
        let expense: f64 = buckets.iter().map(|b| b.expense).sum();
        assert!((income - totals.income).abs() < 1e-9);
        assert!((expense - totals.expense).abs() < 1e-9);
    }
}

#[test]
fn all_time_filter_is_idempotent() {
    let (mut books, _, project_id) = books_with_project("P");
    books.add_entry(LedgerEntry::new(
        EntryKind::Credit,
        10.0,
        "x",
        date(2024, 1, 1),
        project_id,
    ));

    let reference = date(2024, 6, 1);
    let once = filter_range(unify(&books), DateRange::AllTime, reference);
    let twice = filter_range(once.clone(), DateRange::AllTime, reference);
    assert_eq!(once.len(), twice.len());
    assert_eq!(once[0].id, twice[0].id);
}

#[test]
fn empty_books_aggregate_to_nothing() {
    let books = CompanyBooks::new("Empty Co");
    let records = unify(&books);
    assert!(records.is_empty());
    assert_eq!(summarize(&records).net, 0.0);
    assert!(category_totals(&records).is_empty());
    assert!(site_totals(&records).is_empty());
    assert!(trend_series(&records, Granularity::Month, Some(12)).is_empty());
    assert!(with_running_balance(records).is_empty());
}

#[test]
fn missing_categories_group_under_documented_fallbacks() {
    let mut books = CompanyBooks::new("Acme");
    books.add_labor_expense(LaborExpense::new("Day wages", 100.0, date(2024, 1, 1)));
    books.add_office_expense(OfficeExpense::new("Stationery", 50.0, date(2024, 1, 2)));

    let records = unify(&books);
    let categories = category_totals(&records);
    let names: Vec<&str> = categories.iter().map(|c| c.category.as_str()).collect();
    assert!(names.contains(&"Labor"));
    assert!(names.contains(&"Office"));
    assert!(!names.contains(&"null"));
    assert!(!names.contains(&"undefined"));
}

#[test]
fn vendor_attached_debits_group_under_vendor_category() {
    let (mut books, _, project_id) = books_with_project("P");
    let vendor_id = books.add_vendor(Vendor::new("Kumar Electricals").with_category("Electrician"));
    books.add_entry(
        LedgerEntry::new(
            EntryKind::Debit,
            4000.0,
            "Wiring",
            date(2024, 2, 10),
            project_id,
        )
        .with_vendor(vendor_id),
    );

    let records = unify(&books);
    let categories = category_totals(&records);
    assert_eq!(categories[0].category, "Electrician");
    assert_eq!(categories[0].percent, 100.0);
}

#[test]
fn dashboard_keeps_only_last_twelve_months() {
    let (mut books, _, project_id) = books_with_project("P");
    // 15 consecutive months of activity ending 2025-03.
    for offset in 0..15u32 {
        let month = offset % 12 + 1;
        let year = 2024 + (offset / 12) as i32;
        books.add_entry(LedgerEntry::new(
            EntryKind::Credit,
            1.0,
            "m",
            date(year, month, 1),
            project_id,
        ));
    }

    let summary = ReportService::dashboard(&books, DateRange::AllTime, date(2025, 4, 1));
    assert_eq!(summary.monthly_trend.len(), 12);
    assert_eq!(summary.monthly_trend[0].start, date(2024, 4, 1));
    assert_eq!(summary.monthly_trend[11].start, date(2025, 3, 1));
}

#[test]
fn daily_report_caps_at_fifteen_days() {
    let (mut books, _, project_id) = books_with_project("P");
    for day in 1..=20 {
        books.add_entry(LedgerEntry::new(
            EntryKind::Debit,
            2.0,
            "d",
            date(2024, 1, day),
            project_id,
        ));
    }

    let buckets = ReportService::daily_report(&books, DateRange::AllTime, date(2024, 2, 1));
    assert_eq!(buckets.len(), 15);
    assert_eq!(buckets[0].start, date(2024, 1, 6));
    assert_eq!(buckets[14].start, date(2024, 1, 20));
}

#[test]
fn range_filters_use_the_reference_date() {
    let (mut books, _, project_id) = books_with_project("P");
    books.add_entry(LedgerEntry::new(
        EntryKind::Credit,
        10.0,
        "old",
        date(2023, 12, 31),
        project_id,
    ));
    books.add_entry(LedgerEntry::new(
        EntryKind::Credit,
        20.0,
        "recent",
        date(2024, 6, 10),
        project_id,
    ));

    let reference = date(2024, 6, 15);
    let this_year = filter_range(unify(&books), DateRange::ThisYear, reference);
    assert_eq!(this_year.len(), 1);
    assert_eq!(this_year[0].description, "recent");

    let all = filter_range(unify(&books), DateRange::AllTime, reference);
    assert_eq!(all.len(), 2);
}

#[test]
fn grouped_totals_ignore_insertion_order() {
    let build = |reversed: bool| {
        let (mut books, _, project_id) = books_with_project("P");
        let vendor_id = books.add_vendor(Vendor::new("V").with_category("Cement"));
        let mut entries = vec![
            LedgerEntry::new(EntryKind::Credit, 900.0, "in", date(2024, 1, 1), project_id),
            LedgerEntry::new(EntryKind::Debit, 100.0, "a", date(2024, 1, 2), project_id)
                .with_vendor(vendor_id),
            LedgerEntry::new(EntryKind::Debit, 200.0, "b", date(2024, 1, 3), project_id),
        ];
        if reversed {
            entries.reverse();
        }
        for entry in entries {
            books.add_entry(entry);
        }
        let records = unify(&books);
        (category_totals(&records), site_totals(&records))
    };

    assert_eq!(build(false), build(true));
}
