use crate::core::models::snapshot::Snapshot;

/// Status and free-text filter applied to entity listings and exports.
///
/// Both parts are optional and case-insensitive. Card rows can also match
/// on their owner's name.
#[derive(Debug, Clone, Default)]
pub struct ListFilter {
    pub status: Option<String>,
    pub search: Option<String>,
}

impl ListFilter {
    pub fn new(status: Option<&str>, search: Option<&str>) -> Self {
        let clean = |v: Option<&str>| v.map(str::trim).filter(|v| !v.is_empty()).map(str::to_string);
        Self {
            status: clean(status),
            search: clean(search),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.status.is_none() && self.search.is_none()
    }

    pub fn matches(&self, row: &Snapshot, owner_name: Option<&str>) -> bool {
        self.matches_status(row) && self.matches_search(row, owner_name)
    }

    fn matches_status(&self, row: &Snapshot) -> bool {
        self.status
            .as_deref()
            .is_none_or(|wanted| row.status().eq_ignore_ascii_case(wanted))
    }

    fn matches_search(&self, row: &Snapshot, owner_name: Option<&str>) -> bool {
        let Some(query) = self.search.as_deref() else {
            return true;
        };
        let query = query.to_lowercase();
        let hit = |value: &str| value.to_lowercase().contains(&query);

        match row {
            Snapshot::Identity(e) => hit(&e.name) || hit(&e.email) || hit(&e.country),
            Snapshot::Website(e) => hit(&e.name) || hit(&e.url),
            Snapshot::Card(e) => {
                hit(&e.card_holder) || e.last_four.contains(&query) || owner_name.is_some_and(hit)
            }
            Snapshot::Advertiser(e) => {
                hit(&e.name)
                    || e.contact_name.as_deref().is_some_and(hit)
                    || e.contact_email.as_deref().is_some_and(hit)
            }
            Snapshot::Account(e) => {
                hit(&e.account_name)
                    || hit(&e.account_email)
                    || e.affiliate_id.as_deref().is_some_and(hit)
            }
            Snapshot::Order(e) => {
                hit(&e.order_number) || e.product_name.as_deref().is_some_and(hit)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::entity::EntityKind;
    use serde_json::json;

    fn identity(name: &str, status: &str) -> Snapshot {
        Snapshot::from_json(
            EntityKind::Identity,
            json!({ "name": name, "email": "someone@example.com", "country": "DE", "status": status }),
        )
        .unwrap()
    }

    fn card() -> Snapshot {
        Snapshot::from_json(
            EntityKind::Card,
            json!({
                "identity_id": "i1", "last_four": "4242",
                "expiry_month": 3, "expiry_year": 2030, "card_holder": "J. Doe"
            }),
        )
        .unwrap()
    }

    #[test]
    fn empty_filter_matches_everything() {
        let filter = ListFilter::new(Some("  "), None);
        assert!(filter.is_empty());
        assert!(filter.matches(&identity("Jane Doe", "Burned"), None));
    }

    #[test]
    fn status_is_case_insensitive() {
        let filter = ListFilter::new(Some("pending docs"), None);
        assert!(filter.matches(&identity("Jane Doe", "Pending Docs"), None));
        assert!(!filter.matches(&identity("Jane Doe", "Active"), None));
    }

    #[test]
    fn search_checks_kind_specific_fields() {
        let filter = ListFilter::new(None, Some("JANE"));
        assert!(filter.matches(&identity("Jane Doe", "Active"), None));
        assert!(!filter.matches(&identity("Mark Lee", "Active"), None));

        let by_country = ListFilter::new(None, Some("de"));
        assert!(by_country.matches(&identity("Mark Lee", "Active"), None));
    }

    #[test]
    fn card_search_covers_digits_and_owner() {
        assert!(ListFilter::new(None, Some("424")).matches(&card(), None));
        assert!(ListFilter::new(None, Some("jane")).matches(&card(), Some("Jane Doe")));
        assert!(!ListFilter::new(None, Some("jane")).matches(&card(), None));
    }

    #[test]
    fn status_and_search_must_both_match() {
        let filter = ListFilter::new(Some("Burned"), Some("jane"));
        assert!(filter.matches(&identity("Jane Doe", "Burned"), None));
        assert!(!filter.matches(&identity("Jane Doe", "Active"), None));
        assert!(!filter.matches(&identity("Mark Lee", "Burned"), None));
    }
}
