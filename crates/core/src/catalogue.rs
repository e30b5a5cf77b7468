//! Static catalogue reference data.
//!
//! Catalogues are fixed configuration, not runtime state: the submission
//! handlers only ever look them up by slug. The `bundles` entry has no
//! downloadable file; it exists for the bundle-bid flow only.

/// A downloadable reference document describing one bundle category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Catalogue {
    pub slug: &'static str,
    pub title: &'static str,
    /// Public path of the catalogue PDF. `None` for entries without a file.
    pub file_url: Option<&'static str>,
    pub image_url: &'static str,
    pub description: &'static str,
}

/// All catalogues, in display order.
pub const CATALOGUES: &[Catalogue] = &[
    Catalogue {
        slug: "indoor",
        title: "Indoor Units",
        file_url: Some("/catalogues/indoor-units.pdf"),
        image_url: "/images/indoor-units.png",
        description: "VRF indoor units & cassettes - discounted new old stock",
    },
    Catalogue {
        slug: "outdoor",
        title: "Outdoor Units",
        file_url: Some("/catalogues/outdoor-units.pdf"),
        image_url: "/images/outdoor-units.png",
        description: "VRF outdoor condensers - discounted new old stock",
    },
    Catalogue {
        slug: "accessories",
        title: "Accessories",
        file_url: Some("/catalogues/accessories.pdf"),
        image_url: "/images/accessories.png",
        description: "Controls, remotes, parts - discounted new old stock",
    },
    Catalogue {
        slug: "split",
        title: "Split Units",
        file_url: Some("/catalogues/split-units.pdf"),
        image_url: "/images/split-units.png",
        description: "Split AC systems - discounted new old stock",
    },
    Catalogue {
        slug: "spare",
        title: "Spare Parts",
        file_url: Some("/catalogues/spare-parts.pdf"),
        image_url: "/images/spare-parts.png",
        description: "Genuine manufacturer parts - discounted new old stock",
    },
    Catalogue {
        slug: "bundles",
        title: "Equipment Bundles",
        file_url: None,
        image_url: "/images/bundles.png",
        description: "Custom equipment combinations - mix and match from available stock",
    },
];

/// Look up a catalogue by its slug.
pub fn by_slug(slug: &str) -> Option<&'static Catalogue> {
    CATALOGUES.iter().find(|c| c.slug == slug)
}
