//! # Offer Selection
//!
//! Picks an offer out of the generated list and turns it into a line total.
//!
//! ## Selection Rules
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  select_offer   first offer flagged seasonal (auto-select on page load) │
//! │  best_offer     offer with the largest discount on the line             │
//! │  rank_offers    stable sort by priority, highest first                  │
//! │                                                                         │
//! │  OfferSelection (product page state)                                    │
//! │    available ──choose(id)──► selected + applied list                    │
//! │    remove(id) drops from applied, clears selected if it matches         │
//! │                                                                         │
//! │  Quote.final_total uses the SELECTED offer only.                        │
//! │  Quote.display_savings sums APPLIED offers, capped at the line total.   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;
use crate::offers::Offer;

/// First seasonal offer in the list, if any.
pub fn select_offer(offers: &[Offer]) -> Option<&Offer> {
    offers.iter().find(|offer| offer.seasonal)
}

/// Offers sorted by priority, highest first. Equal priorities keep their order.
pub fn rank_offers(offers: &[Offer]) -> Vec<Offer> {
    let mut ranked = offers.to_vec();
    ranked.sort_by(|a, b| b.priority.cmp(&a.priority));
    ranked
}

/// Offer with the largest discount on `unit_price × quantity`.
///
/// On a tie the earlier offer wins.
pub fn best_offer(offers: &[Offer], unit_price: Money, quantity: i64) -> Option<&Offer> {
    offers.iter().fold(None, |best: Option<(&Offer, Money)>, offer| {
        let discount = compute_discount(offer, unit_price, quantity);
        match best {
            Some((_, best_discount)) if best_discount >= discount => best,
            _ => Some((offer, discount)),
        }
    })
    .map(|(offer, _)| offer)
}

/// Amount the offer takes off the line total.
///
/// Percentage offers round half-up. Fixed offers never exceed the line total.
///
/// ## Example
/// ```rust
/// use bazaar_core::{compute_discount, compute_final, generate_offers};
/// use bazaar_core::{Category, Money, PricingContext, Product};
/// use chrono::{TimeZone, Utc};
///
/// let product = Product::new(1, "Lentils", Category::Groceries, Money::from_cents(33333));
/// let ctx = PricingContext::new(1, Utc.with_ymd_and_hms(2026, 6, 3, 9, 0, 0).unwrap());
/// let ten_off = &generate_offers(&product, &ctx)[0];
///
/// // 333.33 × 10% = 33.333 → 33.33
/// assert_eq!(compute_discount(ten_off, product.price, 1), Money::from_cents(3333));
/// assert_eq!(compute_final(ten_off, product.price, 1), Money::from_cents(30000));
/// ```
pub fn compute_discount(offer: &Offer, unit_price: Money, quantity: i64) -> Money {
    offer.amount.amount_off(unit_price.multiply_quantity(quantity))
}

/// Line total after the offer, floored at zero.
pub fn compute_final(offer: &Offer, unit_price: Money, quantity: i64) -> Money {
    unit_price
        .multiply_quantity(quantity)
        .subtract_floored(compute_discount(offer, unit_price, quantity))
}

// =============================================================================
// Offer Selection State
// =============================================================================

/// Priced line for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Quote {
    pub line_total: Money,
    /// Discount from the selected offer.
    pub discount: Money,
    /// `line_total - discount`, floored at zero.
    pub final_total: Money,
    /// Informational sum over every applied offer.
    pub display_savings: Money,
}

/// Offers the shopper has seen, picked and applied for one product line.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct OfferSelection {
    available: Vec<Offer>,
    selected: Option<Offer>,
    applied: Vec<Offer>,
}

impl OfferSelection {
    pub fn new(available: Vec<Offer>) -> Self {
        OfferSelection {
            available,
            selected: None,
            applied: Vec::new(),
        }
    }

    pub fn available(&self) -> &[Offer] {
        &self.available
    }

    pub fn selected(&self) -> Option<&Offer> {
        self.selected.as_ref()
    }

    pub fn applied(&self) -> &[Offer] {
        &self.applied
    }

    /// Selects the first seasonal offer when nothing is selected yet.
    pub fn auto_select(&mut self) -> Option<&Offer> {
        if self.selected.is_none() {
            self.selected = select_offer(&self.available).cloned();
        }
        self.selected.as_ref()
    }

    /// Selects an available offer and adds it to the applied list once.
    ///
    /// Returns `None` when no available offer has that id.
    pub fn choose(&mut self, offer_id: &str) -> Option<&Offer> {
        let offer = self.available.iter().find(|o| o.id == offer_id)?.clone();
        if !self.applied.iter().any(|o| o.id == offer.id) {
            self.applied.push(offer.clone());
        }
        self.selected = Some(offer);
        self.selected.as_ref()
    }

    /// Removes an offer from the applied list, clearing the selection if it matches.
    pub fn remove(&mut self, offer_id: &str) {
        self.applied.retain(|o| o.id != offer_id);
        if self.selected.as_ref().is_some_and(|o| o.id == offer_id) {
            self.selected = None;
        }
    }

    /// Replaces the available offers after quantity or product changes.
    ///
    /// Offers that are no longer eligible drop out of the selection and the
    /// applied list, then auto-selection runs again.
    pub fn refresh(&mut self, available: Vec<Offer>) {
        self.available = available;
        let still_available = |offer: &Offer| self.available.iter().any(|o| o.id == offer.id);

        if self.selected.as_ref().is_some_and(|o| !still_available(o)) {
            self.selected = None;
        }
        let applied = std::mem::take(&mut self.applied);
        self.applied = applied.into_iter().filter(|o| still_available(o)).collect();

        self.auto_select();
    }

    /// Prices the line with the selected offer.
    pub fn quote(&self, unit_price: Money, quantity: i64) -> Quote {
        let line_total = unit_price.multiply_quantity(quantity);
        let discount = self
            .selected
            .as_ref()
            .map_or(Money::zero(), |offer| compute_discount(offer, unit_price, quantity));
        let display_savings = self
            .applied
            .iter()
            .map(|offer| compute_discount(offer, unit_price, quantity))
            .sum::<Money>()
            .clamp(Money::zero(), line_total);

        Quote {
            line_total,
            discount,
            final_total: line_total.subtract_floored(discount),
            display_savings,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::offers::{generate_offers, OfferSource};
    use crate::types::{Category, PricingContext, Product};
    use chrono::{TimeZone, Utc};

    fn offers_for(qty: i64, y: i32, m: u32, d: u32) -> Vec<Offer> {
        let product = Product::new(1, "Flour", Category::Groceries, Money::from_major(1000));
        let ctx = PricingContext::new(qty, Utc.with_ymd_and_hms(y, m, d, 12, 0, 0).unwrap());
        generate_offers(&product, &ctx)
    }

    #[test]
    fn test_select_offer_prefers_first_seasonal() {
        // Weekday in April: Ramadan only.
        let offers = offers_for(1, 2026, 4, 8);
        assert_eq!(select_offer(&offers).map(|o| o.id.as_str()), Some("ramadan_special"));

        // Weekday in June: nothing seasonal.
        assert!(select_offer(&offers_for(2, 2026, 6, 3)).is_none());

        // Saturday in June: weekend offer is present but not seasonal.
        let weekend = offers_for(2, 2026, 6, 6);
        assert!(weekend.iter().any(|o| o.id == "weekend_special"));
        assert!(select_offer(&weekend).is_none());
    }

    #[test]
    fn test_rank_offers_is_stable() {
        let ranked = rank_offers(&offers_for(5, 2026, 6, 3));
        assert_eq!(ranked[0].source, OfferSource::Category);
        let base_ids: Vec<&str> = ranked
            .iter()
            .filter(|o| o.source == OfferSource::Base)
            .map(|o| o.id.as_str())
            .collect();
        assert_eq!(
            base_ids,
            ["percentage_10", "percentage_15", "percentage_20", "fixed_50", "fixed_100"]
        );
    }

    #[test]
    fn test_best_offer() {
        let offers = offers_for(3, 2026, 6, 3);
        let best = best_offer(&offers, Money::from_major(1000), 3).unwrap();
        assert_eq!(best.id, "percentage_20");
        assert!(best_offer(&[], Money::from_major(1000), 3).is_none());
    }

    #[test]
    fn test_fixed_discount_capped_at_line_total() {
        let offers = offers_for(1, 2026, 6, 3);
        let fixed_100 = offers.iter().find(|o| o.id == "fixed_100").unwrap();
        assert_eq!(compute_discount(fixed_100, Money::from_major(40), 1), Money::from_major(40));
        assert_eq!(compute_final(fixed_100, Money::from_major(40), 1), Money::zero());
    }

    #[test]
    fn test_choose_and_remove() {
        let mut selection = OfferSelection::new(offers_for(3, 2026, 6, 3));
        assert!(selection.choose("missing").is_none());

        selection.choose("percentage_10");
        selection.choose("percentage_20");
        selection.choose("percentage_10");
        assert_eq!(selection.applied().len(), 2);
        assert_eq!(selection.selected().map(|o| o.id.as_str()), Some("percentage_10"));

        selection.remove("percentage_10");
        assert!(selection.selected().is_none());
        assert_eq!(selection.applied().len(), 1);
    }

    #[test]
    fn test_quote_uses_selected_offer_only() {
        let mut selection = OfferSelection::new(offers_for(3, 2026, 6, 3));
        selection.choose("percentage_20");
        selection.choose("percentage_15");

        let quote = selection.quote(Money::from_major(1000), 3);
        assert_eq!(quote.line_total, Money::from_major(3000));
        assert_eq!(quote.discount, Money::from_major(450));
        assert_eq!(quote.final_total, Money::from_major(2550));
        assert_eq!(quote.display_savings, Money::from_major(1050));
    }

    #[test]
    fn test_display_savings_capped() {
        let mut selection = OfferSelection::new(offers_for(3, 2026, 6, 3));
        for id in ["percentage_10", "percentage_15", "percentage_20", "fixed_50", "fixed_100"] {
            selection.choose(id);
        }
        let quote = selection.quote(Money::from_major(50), 3);
        assert_eq!(quote.display_savings, Money::from_major(150));
        assert_eq!(quote.discount, Money::from_major(100));
    }

    #[test]
    fn test_refresh_drops_ineligible_offers() {
        let mut selection = OfferSelection::new(offers_for(3, 2026, 4, 8));
        selection.choose("percentage_20");

        selection.refresh(offers_for(1, 2026, 4, 8));
        assert!(selection.applied().is_empty());
        assert_eq!(selection.selected().map(|o| o.id.as_str()), Some("ramadan_special"));
    }
}
