use std::collections::HashSet;

use crm_model::{BulkCreateCustomersPayload, CreateCustomerPayload, CustomerInput, FieldError};
use crm_storage::StorageError;
use tracing::{debug, info, warn};

use super::CrmMutation;
use crate::validators::{self, EMPTY_BATCH_MESSAGE};
use crate::{BatchEmailVisibility, CrmError, CrmResult};

impl CrmMutation {
    /// Creates one customer, or nothing if any check fails.
    pub fn create_customer(&self, input: CustomerInput) -> CrmResult<CreateCustomerPayload> {
        let input = normalize(input);
        self.store.with_transaction(|tx| -> CrmResult<_> {
            let taken = tx.customer_email_exists(&input.email)?;
            let errors = validators::validate_customer(&input, taken);
            if !errors.is_empty() {
                warn!(email = %input.email, errors = errors.len(), "customer rejected");
                return Ok(CreateCustomerPayload::rejected(errors));
            }

            match tx.create_customer(&input) {
                Ok(customer) => {
                    info!(customer_id = %customer.id, "customer created");
                    Ok(CreateCustomerPayload::created(customer))
                }
                Err(e) if e.is_unique_violation() => {
                    warn!(email = %input.email, "customer rejected by unique constraint");
                    Ok(CreateCustomerPayload::rejected(vec![validators::email_taken(&input.email)]))
                }
                Err(e) => Err(CrmError::from(e)),
            }
        })
    }

    /// Creates every valid item of a batch, in input order.
    ///
    /// Items are validated first; a failing item adds its errors (tagged with
    /// its index) and is skipped without affecting the others. The accepted
    /// items are then written in a single transaction. A unique-constraint
    /// hit during that write skips just that item; any other storage error
    /// rolls back the whole batch and is returned as `Err`.
    pub fn bulk_create_customers(
        &self,
        inputs: Vec<CustomerInput>,
    ) -> CrmResult<BulkCreateCustomersPayload> {
        let mut payload = BulkCreateCustomersPayload::default();
        if inputs.is_empty() {
            payload
                .errors
                .push(FieldError::validation("customers", EMPTY_BATCH_MESSAGE));
            return Ok(payload);
        }
        let total = inputs.len();

        let accepted = self.store.read(|tx| -> Result<_, StorageError> {
            let mut accepted_emails = HashSet::new();
            let mut accepted = Vec::with_capacity(inputs.len());
            for (index, input) in inputs.into_iter().enumerate() {
                let input = normalize(input);
                let taken = tx.customer_email_exists(&input.email)?
                    || (self.batch_visibility == BatchEmailVisibility::IncludeAccepted
                        && accepted_emails.contains(&input.email));
                let errors = validators::validate_customer(&input, taken);
                if errors.is_empty() {
                    accepted_emails.insert(input.email.clone());
                    accepted.push((index, input));
                } else {
                    debug!(index, email = %input.email, "batch item rejected");
                    payload.errors.extend(errors.into_iter().map(|e| e.at(index)));
                }
            }
            Ok(accepted)
        })?;

        let (created, write_errors) = self.store.with_transaction(|tx| -> CrmResult<_> {
            let mut created = Vec::with_capacity(accepted.len());
            let mut errors = Vec::new();
            for (index, input) in &accepted {
                match tx.create_customer(input) {
                    Ok(customer) => created.push(customer),
                    Err(e) if e.is_unique_violation() => {
                        debug!(index, email = %input.email, "batch item hit unique constraint");
                        errors.push(validators::email_taken(&input.email).at(*index));
                    }
                    Err(e) => return Err(CrmError::from(e)),
                }
            }
            Ok((created, errors))
        })?;

        payload.customers = created;
        payload.errors.extend(write_errors);
        payload.errors.sort_by_key(|e| e.index);

        info!(
            requested = total,
            created = payload.customers.len(),
            rejected = total - payload.customers.len(),
            "bulk customer create finished"
        );
        Ok(payload)
    }
}

/// An empty phone means no phone.
fn normalize(mut input: CustomerInput) -> CustomerInput {
    if input.phone.as_deref().is_some_and(|p| p.trim().is_empty()) {
        input.phone = None;
    }
    input
}
