// ── Catalog store ──
//
// Read-only, insertion-ordered map from EntryId to entry. Built once at
// startup from the data feed; the showcase only ever reads it.

use std::sync::Arc;

use indexmap::IndexMap;

use crate::error::CatalogError;
use crate::model::{CatalogEntry, EntryId, ExternalLinks};

/// Immutable catalog of portfolio entries.
#[derive(Debug, Clone, Default)]
pub struct CatalogStore {
    entries: IndexMap<EntryId, Arc<CatalogEntry>>,
}

impl CatalogStore {
    /// Build a store from feed records, preserving their order.
    ///
    /// Rejects duplicate ids and records with a blank title or category,
    /// since neither can be rendered as a card. Categories are trimmed so
    /// they match the filter tokens built from them.
    pub fn new(records: impl IntoIterator<Item = CatalogEntry>) -> Result<Self, CatalogError> {
        let mut entries = IndexMap::new();
        for mut record in records {
            let category = record.category.trim();
            if category.len() != record.category.len() {
                record.category = category.to_owned();
            }
            if record.title.trim().is_empty() {
                return Err(CatalogError::MissingField {
                    id: record.id,
                    field: "title",
                });
            }
            if record.category.trim().is_empty() {
                return Err(CatalogError::MissingField {
                    id: record.id,
                    field: "category",
                });
            }
            if entries.contains_key(&record.id) {
                return Err(CatalogError::DuplicateId { id: record.id });
            }
            entries.insert(record.id.clone(), Arc::new(record));
        }
        Ok(Self { entries })
    }

    /// The catalog shipped with the binary.
    pub fn builtin() -> Self {
        let entries = builtin_entries()
            .into_iter()
            .map(|e| (e.id.clone(), Arc::new(e)))
            .collect();
        Self { entries }
    }

    pub fn get(&self, id: &EntryId) -> Option<Arc<CatalogEntry>> {
        self.entries.get(id).map(Arc::clone)
    }

    /// Entries in feed order.
    pub fn entries(&self) -> impl Iterator<Item = &Arc<CatalogEntry>> {
        self.entries.values()
    }

    /// Distinct categories in first-seen order.
    pub fn categories(&self) -> Vec<String> {
        let mut seen: Vec<String> = Vec::new();
        for entry in self.entries.values() {
            if !seen.iter().any(|c| *c == entry.category) {
                seen.push(entry.category.clone());
            }
        }
        seen
    }

    pub fn has_category(&self, category: &str) -> bool {
        self.entries.values().any(|e| e.category == category)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| (*s).to_owned()).collect()
}

fn builtin_entries() -> Vec<CatalogEntry> {
    vec![
        CatalogEntry {
            id: EntryId::Numeric(1),
            title: "Campus Network Infrastructure".into(),
            category: "Networking".into(),
            description: "Complete network design and implementation for school campus with \
                          500+ connected devices. This project involved planning, configuring, \
                          and deploying a robust network infrastructure."
                .into(),
            details: strings(&[
                "Network segmentation using VLANs for different departments",
                "OSPF routing protocol implementation",
                "Firewall configuration and security policies",
                "Quality of Service (QoS) for priority traffic",
                "Network monitoring with PRTG",
            ]),
            technologies: strings(&["Cisco", "VLAN", "OSPF", "ACL", "QoS"]),
            image: Some("images/project1.jpg".into()),
            links: ExternalLinks {
                repository: Some("https://github.com/yourusername/network-project".into()),
                demo: Some("https://demo.yourportfolio.com/network-project".into()),
            },
        },
        CatalogEntry {
            id: EntryId::Numeric(2),
            title: "Inventory Management System".into(),
            category: "Web Development".into(),
            description: "Full-stack web application for managing computer lab inventory with \
                          QR code integration and real-time tracking."
                .into(),
            details: strings(&[
                "User authentication and role-based access",
                "QR code generation and scanning",
                "Real-time inventory updates",
                "Reporting and analytics dashboard",
                "Mobile-responsive design",
            ]),
            technologies: strings(&["PHP", "MySQL", "JavaScript", "Bootstrap", "QR Code"]),
            image: Some("images/project2.jpg".into()),
            links: ExternalLinks {
                repository: Some("https://github.com/yourusername/inventory-system".into()),
                demo: Some("https://demo.yourportfolio.com/inventory-system".into()),
            },
        },
        CatalogEntry {
            id: EntryId::Numeric(3),
            title: "Network Security Audit".into(),
            category: "Security".into(),
            description: "Comprehensive security assessment and penetration testing for school \
                          network infrastructure."
                .into(),
            details: strings(&[
                "Vulnerability scanning with OpenVAS",
                "Penetration testing using Metasploit",
                "Network traffic analysis with Wireshark",
                "Security policy recommendations",
                "Staff security awareness training",
            ]),
            technologies: strings(&["Wireshark", "Nmap", "Metasploit", "OpenVAS", "Security"]),
            image: Some("images/project3.jpg".into()),
            links: ExternalLinks {
                repository: Some("https://github.com/yourusername/security-audit".into()),
                demo: Some("https://demo.yourportfolio.com/security-audit".into()),
            },
        },
        CatalogEntry {
            id: EntryId::Numeric(4),
            title: "Enterprise WiFi Setup".into(),
            category: "Networking".into(),
            description: "Enterprise-grade wireless network deployment with centralized \
                          management and security features."
                .into(),
            details: strings(&[
                "Site survey and heat mapping",
                "Multiple access point deployment",
                "RADIUS server for authentication",
                "Guest network with captive portal",
                "Bandwidth management and monitoring",
            ]),
            technologies: strings(&["MikroTik", "UniFi", "RADIUS", "WiFi", "Security"]),
            image: Some("images/project4.jpg".into()),
            links: ExternalLinks {
                repository: Some("https://github.com/yourusername/wifi-setup".into()),
                demo: Some("https://demo.yourportfolio.com/wifi-setup".into()),
            },
        },
    ]
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn entry(id: u64, title: &str, category: &str) -> CatalogEntry {
        CatalogEntry {
            id: EntryId::Numeric(id),
            title: title.into(),
            category: category.into(),
            description: String::new(),
            details: Vec::new(),
            technologies: Vec::new(),
            image: None,
            links: ExternalLinks::default(),
        }
    }

    #[test]
    fn builtin_catalog_has_reference_entries() {
        let store = CatalogStore::builtin();
        assert_eq!(store.len(), 4);
        let second = store.get(&EntryId::from("2")).unwrap();
        assert_eq!(second.title, "Inventory Management System");
        assert_eq!(second.details.len(), 5);
        assert_eq!(second.technologies.len(), 5);
    }

    #[test]
    fn categories_are_distinct_in_first_seen_order() {
        let store = CatalogStore::builtin();
        assert_eq!(
            store.categories(),
            vec!["Networking", "Web Development", "Security"]
        );
    }

    #[test]
    fn missing_id_is_none() {
        let store = CatalogStore::builtin();
        assert!(store.get(&EntryId::from("nonexistent")).is_none());
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let err = CatalogStore::new([entry(1, "A", "X"), entry(1, "B", "Y")]).unwrap_err();
        assert_eq!(
            err,
            CatalogError::DuplicateId {
                id: EntryId::Numeric(1)
            }
        );
    }

    #[test]
    fn blank_category_is_rejected() {
        let err = CatalogStore::new([entry(5, "Lab", "  ")]).unwrap_err();
        assert!(matches!(
            err,
            CatalogError::MissingField {
                field: "category",
                ..
            }
        ));
    }

    #[test]
    fn padded_categories_are_trimmed() {
        let store = CatalogStore::new([entry(1, "A", " Networking"), entry(2, "B", "Networking\t")])
            .unwrap();
        assert_eq!(store.categories(), vec!["Networking"]);
        assert_eq!(store.get(&EntryId::Numeric(1)).unwrap().category, "Networking");
        assert!(store.has_category("Networking"));
    }

    #[test]
    fn feed_order_is_preserved() {
        let store =
            CatalogStore::new([entry(3, "C", "X"), entry(1, "A", "Y"), entry(2, "B", "X")])
                .unwrap();
        let ids: Vec<String> = store.entries().map(|e| e.id.to_string()).collect();
        assert_eq!(ids, vec!["3", "1", "2"]);
    }
}
