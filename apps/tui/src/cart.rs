use serde::Serialize;

use crate::domain::Experience;

/// Goods and services tax applied at checkout.
pub const GST_RATE: f64 = 0.18;

/// An experience the user intends to book, with a head count.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CartItem {
    /// Cart-scoped id. Differs from the experience id when the item was
    /// reserved for a specific location.
    pub id: String,
    pub experience: Experience,
    pub quantity: u32,
    pub location: Option<String>,
    pub city_tag: Option<String>,
}

impl CartItem {
    pub fn from_experience(experience: Experience) -> Self {
        Self {
            id: experience.id.clone(),
            experience,
            quantity: 1,
            location: None,
            city_tag: None,
        }
    }

    /// Item reserved for `location`; the same experience at two locations
    /// produces two distinct cart entries.
    pub fn at_location(experience: Experience, location: &str) -> Self {
        Self {
            id: format!("{}-{location}", experience.id),
            experience,
            quantity: 1,
            location: Some(location.to_string()),
            city_tag: Some(location.chars().take(3).collect::<String>().to_uppercase()),
        }
    }

    pub fn unit_price(&self) -> f64 {
        self.experience.price_per_participant
    }

    pub fn line_total(&self) -> f64 {
        self.unit_price() * f64::from(self.quantity)
    }
}

/// Ordered cart owned by the application root. Lives for the session only.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Cart {
    items: Vec<CartItem>,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds one unit. An existing entry keeps its position and gains one;
    /// a new entry is appended with quantity 1.
    pub fn add(&mut self, item: CartItem) {
        if let Some(existing) = self.items.iter_mut().find(|entry| entry.id == item.id) {
            existing.quantity = existing.quantity.saturating_add(1);
        } else {
            self.items.push(CartItem { quantity: 1, ..item });
        }
    }

    /// Removes the entry with `id`, if any.
    pub fn remove(&mut self, id: &str) {
        self.items.retain(|entry| entry.id != id);
    }

    /// Shifts the quantity of `id` by `delta`, never going below 1.
    pub fn update_quantity(&mut self, id: &str, delta: i64) {
        if let Some(entry) = self.items.iter_mut().find(|entry| entry.id == id) {
            let next = i64::from(entry.quantity).saturating_add(delta).max(1);
            entry.quantity = u32::try_from(next).unwrap_or(u32::MAX);
        }
    }

    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    pub fn get(&self, id: &str) -> Option<&CartItem> {
        self.items.iter().find(|entry| entry.id == id)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Total head count, shown on the cart badge.
    pub fn count(&self) -> u64 {
        self.items.iter().map(|entry| u64::from(entry.quantity)).sum()
    }

    pub fn subtotal(&self) -> f64 {
        self.items.iter().map(CartItem::line_total).sum()
    }

    pub fn gst(&self) -> f64 {
        self.subtotal() * GST_RATE
    }

    pub fn total(&self) -> f64 {
        self.subtotal() + self.gst()
    }
}
