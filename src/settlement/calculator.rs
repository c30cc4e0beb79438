use crate::core::error::{LedgerError, LedgerResult};
use crate::core::ledger::OperationSource;
use crate::core::operation::Operation;
use crate::core::payment::Holder;
use crate::core::vendor::{EventId, MembershipTier, VendorId};
use crate::settlement::commission::CommissionTable;
use crate::settlement::result::{BalanceStatus, MethodBreakdown, Settlement};
use log::debug;
use rust_decimal::Decimal;

/// Computes vendor settlements from recorded operations.
///
/// The calculation is a pure fold: no I/O, no failure modes, and the
/// result does not depend on operation order.
#[derive(Debug, Clone, Default)]
pub struct SettlementCalculator {
    rates: CommissionTable,
}

impl SettlementCalculator {
    pub fn new(rates: CommissionTable) -> Self {
        Self { rates }
    }

    pub fn rates(&self) -> &CommissionTable {
        &self.rates
    }

    /// Settle a vendor's operations.
    ///
    /// # Algorithm
    ///
    /// 1. Add each operation to its payment-method bucket, to the total
    ///    sold, and to the holding bucket of whoever has the money
    ///    (PIX: association; cash and card: vendor).
    /// 2. Once all operations are in, derive:
    ///    - commission = total sold × rate(tier)
    ///    - profit = total sold − commission
    ///    - balance = total sold − held by vendor − commission
    ///
    /// A positive balance is paid by the association to the vendor, a
    /// negative one by the vendor to the association. An empty list gives
    /// all zeros and [`BalanceStatus::NotCalculated`].
    ///
    /// # Examples
    ///
    /// ```
    /// use fair_settlement::prelude::*;
    /// use rust_decimal_macros::dec;
    ///
    /// let vendor = VendorId::new("V-1");
    /// let fair = EventId::new("FEIRA-1");
    /// let ops = vec![
    ///     Operation::new(vendor.clone(), fair.clone(), PaymentMethod::Pix, dec!(100), "Queijo").unwrap(),
    ///     Operation::new(vendor, fair, PaymentMethod::Cash, dec!(50), "Queijo").unwrap(),
    /// ];
    ///
    /// let settlement = SettlementCalculator::default().calculate(&ops, MembershipTier::Member);
    /// assert_eq!(settlement.balance, dec!(70));
    /// assert_eq!(settlement.message(), "association owes vendor R$ 70,00");
    /// ```
    pub fn calculate<'a, I>(&self, operations: I, tier: MembershipTier) -> Settlement
    where
        I: IntoIterator<Item = &'a Operation>,
    {
        let mut by_method = MethodBreakdown::default();
        let mut total_sold = Decimal::ZERO;
        let mut held_by_vendor = Decimal::ZERO;
        let mut held_by_association = Decimal::ZERO;

        for op in operations {
            let amount = op.amount();
            by_method.get_mut(op.method()).add(amount);
            match op.method().holder() {
                Holder::Vendor => held_by_vendor += amount,
                Holder::Association => held_by_association += amount,
            }
            total_sold += amount;
        }

        let commission_rate = self.rates.rate_for(tier);
        let total_commission = total_sold * commission_rate;
        let total_profit = total_sold - total_commission;
        let balance = total_sold - held_by_vendor - total_commission;
        let status = BalanceStatus::from_balance(balance, by_method.total_count() > 0);

        debug!(
            "settled {} operations ({}): sold={} commission={} balance={}",
            by_method.total_count(),
            tier,
            total_sold,
            total_commission,
            balance
        );

        Settlement {
            tier,
            commission_rate,
            total_sold,
            by_method,
            held_by_vendor,
            held_by_association,
            total_commission,
            total_profit,
            balance,
            status,
        }
    }

    /// Fetch a vendor and its operations from `source` and settle them.
    pub fn settle_vendor<S>(
        &self,
        source: &S,
        event: &EventId,
        vendor: &VendorId,
    ) -> LedgerResult<Settlement>
    where
        S: OperationSource + ?Sized,
    {
        let record = source
            .vendor(event, vendor)
            .ok_or_else(|| LedgerError::VendorNotRegistered {
                event: event.clone(),
                vendor: vendor.clone(),
            })?;
        Ok(self.calculate(source.operations_for(event, vendor), record.tier()))
    }
}
