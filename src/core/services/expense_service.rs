//! Validated helpers for office expenses, labor expenses, and labor payments.

use chrono::NaiveDate;
use uuid::Uuid;

use crate::core::services::{ServiceError, ServiceResult};
use crate::domain::{CompanyBooks, LaborExpense, LaborPaymentReceived, OfficeExpense};
use crate::errors::BooksError;

/// Provides validated CRUD helpers for the expense-side collections.
pub struct ExpenseService;

impl ExpenseService {
    pub fn add_office(books: &mut CompanyBooks, expense: OfficeExpense) -> ServiceResult<Uuid> {
        check_amount(expense.amount)?;
        Ok(books.add_office_expense(expense))
    }

    pub fn add_labor(books: &mut CompanyBooks, expense: LaborExpense) -> ServiceResult<Uuid> {
        check_amount(expense.amount)?;
        if let Some(site_id) = expense.site_id {
            if books.project(site_id).is_none() {
                return Err(ServiceError::Books(BooksError::ProjectNotFound(
                    site_id.to_string(),
                )));
            }
        }
        if let Some(vendor_id) = expense.vendor_id {
            if books.vendor(vendor_id).is_none() {
                return Err(ServiceError::Books(BooksError::VendorNotFound(
                    vendor_id.to_string(),
                )));
            }
        }
        Ok(books.add_labor_expense(expense))
    }

    pub fn add_payment(
        books: &mut CompanyBooks,
        payment: LaborPaymentReceived,
    ) -> ServiceResult<Uuid> {
        check_amount(payment.amount)?;
        if let Some(project_id) = payment.project_id {
            if books.project(project_id).is_none() {
                return Err(ServiceError::Books(BooksError::ProjectNotFound(
                    project_id.to_string(),
                )));
            }
        }
        if let Some(client_id) = payment.client_id {
            if books.client(client_id).is_none() {
                return Err(ServiceError::Books(BooksError::ClientNotFound(
                    client_id.to_string(),
                )));
            }
        }
        Ok(books.add_labor_payment(payment))
    }

    /// Settles an office expense, recording the payment date.
    pub fn mark_office_paid(
        books: &mut CompanyBooks,
        id: Uuid,
        date: NaiveDate,
    ) -> ServiceResult<()> {
        let expense = books
            .office_expense_mut(id)
            .ok_or_else(|| ServiceError::Invalid("Office expense not found".into()))?;
        expense.mark_paid(date);
        books.touch();
        Ok(())
    }

    /// Settles a labor expense, recording the payment date.
    pub fn mark_labor_paid(
        books: &mut CompanyBooks,
        id: Uuid,
        date: NaiveDate,
    ) -> ServiceResult<()> {
        let expense = books
            .labor_expense_mut(id)
            .ok_or_else(|| ServiceError::Invalid("Labor expense not found".into()))?;
        expense.mark_paid(date);
        books.touch();
        Ok(())
    }

    pub fn remove_office(books: &mut CompanyBooks, id: Uuid) -> ServiceResult<OfficeExpense> {
        books
            .remove_office_expense(id)
            .ok_or_else(|| ServiceError::Invalid("Office expense not found".into()))
    }

    pub fn remove_labor(books: &mut CompanyBooks, id: Uuid) -> ServiceResult<LaborExpense> {
        books
            .remove_labor_expense(id)
            .ok_or_else(|| ServiceError::Invalid("Labor expense not found".into()))
    }

    pub fn remove_payment(
        books: &mut CompanyBooks,
        id: Uuid,
    ) -> ServiceResult<LaborPaymentReceived> {
        books
            .remove_labor_payment(id)
            .ok_or_else(|| ServiceError::Invalid("Labor payment not found".into()))
    }
}

fn check_amount(amount: f64) -> ServiceResult<()> {
    if !amount.is_finite() || amount < 0.0 {
        return Err(ServiceError::Invalid(
            "Amount must be a non-negative number".into(),
        ));
    }
    Ok(())
}
