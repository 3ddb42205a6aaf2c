//! Decoding of repeated `group[index][field]` blocks into ordered records.
//!
//! Groups are dense from index 0. Decoding stops at the first index whose
//! discriminator key is absent, so `0, 2` with `1` missing yields only the
//! record at index 0. Truncation at a gap is the contract, not an error.

use super::domain::{AgentRecord, ApplicantCategory, PersonRecord, ServiceAddress};
use super::form::{indexed_key, nested_key, FormFields};

/// Which decoded records survive into the output list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Retention {
    /// Every present index is kept, blank or not.
    Always,
    /// The discriminator value must be non-blank.
    NonBlankDiscriminator,
    /// At least one of the listed fields must be non-blank.
    AnyNonBlank(&'static [&'static str]),
}

/// Declares how one repeated group is laid out on the form.
#[derive(Debug, Clone, Copy)]
pub struct GroupSpec {
    pub group: &'static str,
    pub discriminator: &'static str,
    pub retention: Retention,
}

pub const INVENTORS: GroupSpec = GroupSpec {
    group: "inventors",
    discriminator: "name",
    retention: Retention::Always,
};

pub const APPLICANTS: GroupSpec = GroupSpec {
    group: "applicants",
    discriminator: "name",
    retention: Retention::NonBlankDiscriminator,
};

pub const AGENTS: GroupSpec = GroupSpec {
    group: "agents",
    discriminator: "inpaNo",
    retention: Retention::AnyNonBlank(&["inpaNo", "name"]),
};

const SERVICE_ADDRESS_GROUP: &str = "serviceAddress";
const INDIAN_RESIDENCY: &str = "India";

/// Read view over one index of a group.
pub struct GroupEntry<'a> {
    fields: &'a FormFields,
    spec: &'a GroupSpec,
    index: usize,
}

impl<'a> GroupEntry<'a> {
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn text(&self, field: &str) -> String {
        self.fields
            .text(&indexed_key(self.spec.group, self.index, field))
            .to_string()
    }

    fn is_blank(&self, field: &str) -> bool {
        self.fields
            .non_empty(&indexed_key(self.spec.group, self.index, field))
            .is_none()
    }

    fn retained(&self) -> bool {
        match self.spec.retention {
            Retention::Always => true,
            Retention::NonBlankDiscriminator => !self.is_blank(self.spec.discriminator),
            Retention::AnyNonBlank(fields) => fields.iter().any(|field| !self.is_blank(field)),
        }
    }
}

/// Walk `spec.group` from index 0 until the discriminator key is missing,
/// building a record for each retained index.
pub fn decode_group<T, F>(fields: &FormFields, spec: &GroupSpec, mut build: F) -> Vec<T>
where
    F: FnMut(&GroupEntry<'_>) -> T,
{
    (0..dense_len(fields, spec))
        .map(|index| GroupEntry {
            fields,
            spec,
            index,
        })
        .filter(GroupEntry::retained)
        .map(|entry| build(&entry))
        .collect()
}

/// Number of consecutive indices present for `spec`, retained or not.
pub fn dense_len(fields: &FormFields, spec: &GroupSpec) -> usize {
    (0..)
        .take_while(|index| fields.contains(&indexed_key(spec.group, *index, spec.discriminator)))
        .count()
}

fn person_from(entry: &GroupEntry<'_>) -> PersonRecord {
    let residency = entry.text("residency");
    let state = if residency == INDIAN_RESIDENCY {
        entry.text("state")
    } else {
        String::new()
    };

    PersonRecord {
        name: entry.text("name"),
        gender: entry.text("gender"),
        nationality: entry.text("nationality"),
        residency,
        address: entry.text("address"),
        state,
        category: None,
    }
}

pub fn decode_inventors(fields: &FormFields) -> Vec<PersonRecord> {
    decode_group(fields, &INVENTORS, person_from)
}

pub fn decode_applicants(fields: &FormFields) -> Vec<PersonRecord> {
    decode_group(fields, &APPLICANTS, |entry| PersonRecord {
        category: Some(ApplicantCategory::from_form_value(&entry.text("category"))),
        ..person_from(entry)
    })
}

pub fn decode_agents(fields: &FormFields) -> Vec<AgentRecord> {
    decode_group(fields, &AGENTS, |entry| AgentRecord {
        inpa_no: entry.text("inpaNo"),
        name: entry.text("name"),
        mobile: entry.text("mobile"),
        email: entry.text("email"),
    })
}

pub fn decode_service_address(fields: &FormFields) -> ServiceAddress {
    let read = |field: &str| {
        fields
            .text(&nested_key(SERVICE_ADDRESS_GROUP, field))
            .to_string()
    };

    ServiceAddress {
        name: read("serviceName"),
        postal_address: read("postalAddress"),
        telephone: read("telephone"),
        mobile: read("mobile"),
        fax: read("fax"),
        email: read("email"),
    }
}
