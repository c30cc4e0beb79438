use crate::core::error::{LedgerError, LedgerResult};
use crate::core::operation::{validate_amount, Operation};
use crate::core::payment::PaymentMethod;
use crate::core::vendor::{EventId, Vendor, VendorId};
use log::{info, warn};
use rust_decimal::Decimal;
use std::collections::BTreeMap;
use uuid::Uuid;

/// Read side of the operation store, as the settlement needs it.
///
/// A vendor/event pair with no operations yields an empty list, not an
/// error; the settlement reports that as "not yet calculated".
pub trait OperationSource {
    /// The vendor record as registered at `event`.
    fn vendor(&self, event: &EventId, vendor: &VendorId) -> Option<&Vendor>;

    /// All operations a vendor recorded at `event`, in recording order.
    fn operations_for(&self, event: &EventId, vendor: &VendorId) -> Vec<&Operation>;

    /// Every vendor registered at `event`, ordered by id.
    fn vendors_at(&self, event: &EventId) -> Vec<&Vendor>;
}

/// In-memory operation ledger for one or more fairs.
///
/// Holds the vendor/event registrations and the operations recorded
/// against them. Settlements are never stored here; they are derived
/// from the operations on every read.
#[derive(Debug, Clone, Default)]
pub struct EventLedger {
    /// event -> vendor id -> vendor
    registrations: BTreeMap<EventId, BTreeMap<VendorId, Vendor>>,
    operations: Vec<Operation>,
}

impl EventLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a vendor at an event, replacing any previous record.
    pub fn register_vendor(&mut self, event: EventId, vendor: Vendor) {
        info!("registering vendor {} at event {}", vendor.id, event);
        self.registrations
            .entry(event)
            .or_default()
            .insert(vendor.id.clone(), vendor);
    }

    pub fn is_registered(&self, event: &EventId, vendor: &VendorId) -> bool {
        self.registrations
            .get(event)
            .map(|vendors| vendors.contains_key(vendor))
            .unwrap_or(false)
    }

    /// Record a sale. The vendor must be registered at the operation's event.
    pub fn record(&mut self, operation: Operation) -> LedgerResult<Uuid> {
        validate_amount(operation.amount())?;
        if !self.is_registered(operation.event(), operation.vendor()) {
            warn!(
                "rejecting operation {} for unregistered vendor {} at {}",
                operation.id(),
                operation.vendor(),
                operation.event()
            );
            return Err(LedgerError::VendorNotRegistered {
                event: operation.event().clone(),
                vendor: operation.vendor().clone(),
            });
        }
        let id = operation.id();
        self.operations.push(operation);
        Ok(id)
    }

    /// Correct the method and amount of a recorded operation.
    pub fn edit_operation(
        &mut self,
        id: Uuid,
        method: PaymentMethod,
        amount: Decimal,
    ) -> LedgerResult<()> {
        let operation = self
            .operations
            .iter_mut()
            .find(|op| op.id() == id)
            .ok_or(LedgerError::OperationNotFound(id))?;
        operation.amend(method, amount)?;
        info!("operation {} edited: {} {}", id, method, amount);
        Ok(())
    }

    /// Remove an operation, returning it.
    pub fn remove_operation(&mut self, id: Uuid) -> LedgerResult<Operation> {
        let index = self
            .operations
            .iter()
            .position(|op| op.id() == id)
            .ok_or(LedgerError::OperationNotFound(id))?;
        info!("operation {} removed", id);
        Ok(self.operations.remove(index))
    }

    pub fn operation(&self, id: Uuid) -> Option<&Operation> {
        self.operations.iter().find(|op| op.id() == id)
    }

    pub fn operations(&self) -> &[Operation] {
        &self.operations
    }

    /// All events with at least one registered vendor.
    pub fn events(&self) -> Vec<&EventId> {
        self.registrations.keys().collect()
    }

    pub fn len(&self) -> usize {
        self.operations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }
}

impl OperationSource for EventLedger {
    fn vendor(&self, event: &EventId, vendor: &VendorId) -> Option<&Vendor> {
        self.registrations.get(event).and_then(|vendors| vendors.get(vendor))
    }

    fn operations_for(&self, event: &EventId, vendor: &VendorId) -> Vec<&Operation> {
        self.operations
            .iter()
            .filter(|op| op.event() == event && op.vendor() == vendor)
            .collect()
    }

    fn vendors_at(&self, event: &EventId) -> Vec<&Vendor> {
        self.registrations
            .get(event)
            .map(|vendors| vendors.values().collect())
            .unwrap_or_default()
    }
}
