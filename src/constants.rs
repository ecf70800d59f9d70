//
//  mediawiki-butt
//  constants.rs
//
//  Created by Ngonidzashe Mangudya on 2026/10/17.
//  Copyright (c) 2026 IAMNGONI. All rights reserved.
//

//! Well-known MediaWiki namespace identifiers.
//!
//! These are the namespaces defined by MediaWiki core and the most widely
//! deployed extensions. Site-specific namespaces are not listed.
//!
//! ```rust
//! use mediawiki_butt::constants::{is_known_namespace, namespace_id, MAIN_NAMESPACE};
//!
//! assert_eq!(namespace_id("Template"), Some(10));
//! assert_eq!(namespace_id("user talk"), Some(3));
//! assert!(is_known_namespace(MAIN_NAMESPACE));
//! assert!(!is_known_namespace(4242));
//! ```

use std::collections::HashMap;

use once_cell::sync::Lazy;

/// The main (article) namespace.
pub const MAIN_NAMESPACE: i32 = 0;

/// Canonical namespace names and their ids.
pub const NAMESPACES: &[(&str, i32)] = &[
    ("Media", -2),
    ("Special", -1),
    ("Main", 0),
    ("Talk", 1),
    ("User", 2),
    ("User talk", 3),
    ("Project", 4),
    ("Project talk", 5),
    ("File", 6),
    ("File talk", 7),
    ("MediaWiki", 8),
    ("MediaWiki talk", 9),
    ("Template", 10),
    ("Template talk", 11),
    ("Help", 12),
    ("Help talk", 13),
    ("Category", 14),
    ("Category talk", 15),
    ("Portal", 100),
    ("Portal talk", 101),
    ("Draft", 118),
    ("Draft talk", 119),
    ("TimedText", 710),
    ("TimedText talk", 711),
    ("Module", 828),
    ("Module talk", 829),
    ("Gadget", 2300),
    ("Gadget talk", 2301),
    ("Gadget definition", 2302),
    ("Gadget definition talk", 2303),
    ("Topic", 2600),
];

static BY_NAME: Lazy<HashMap<String, i32>> = Lazy::new(|| {
    NAMESPACES
        .iter()
        .map(|(name, id)| (name.to_lowercase(), *id))
        .collect()
});

/// Looks up a namespace id by name, ignoring case and `_` vs. space.
pub fn namespace_id(name: &str) -> Option<i32> {
    BY_NAME.get(&name.trim().replace('_', " ").to_lowercase()).copied()
}

/// Whether `id` is one of the [`NAMESPACES`].
pub fn is_known_namespace(id: i32) -> bool {
    NAMESPACES.iter().any(|(_, ns)| *ns == id)
}

/// Parses either a numeric id or a namespace name.
pub fn parse_namespace(value: &str) -> Option<i32> {
    value.trim().parse().ok().or_else(|| namespace_id(value))
}
