use super::common::*;
use crate::workflows::filing::decoder::{
    decode_agents, decode_applicants, decode_inventors, decode_service_address, dense_len,
    APPLICANTS,
};
use crate::workflows::filing::domain::ApplicantCategory;
use crate::workflows::filing::form::FormFields;

#[test]
fn decode_stops_at_first_gap() {
    let fields = FormFields::new()
        .with("applicants[0][name]", "First")
        .with("applicants[2][name]", "Third");

    let applicants = decode_applicants(&fields);
    assert_eq!(applicants.len(), 1);
    assert_eq!(applicants[0].name, "First");
    assert_eq!(dense_len(&fields, &APPLICANTS), 1);
}

#[test]
fn dense_prefix_counts_skipped_records() {
    let fields = FormFields::new()
        .with("applicants[0][name]", "")
        .with("applicants[1][name]", "Helio Labs")
        .with("applicants[3][name]", "Unreached");

    assert_eq!(dense_len(&fields, &APPLICANTS), 2);
    let applicants = decode_applicants(&fields);
    assert_eq!(applicants.len(), 1);
    assert_eq!(applicants[0].name, "Helio Labs");
}

#[test]
fn decoding_is_repeatable() {
    let fields = filing_form()
        .with("applicants[1][name]", "Helio Labs")
        .with("applicants[1][category]", "Start-Up");

    let first = decode_applicants(&fields);
    let second = decode_applicants(&fields);
    assert_eq!(first, second);
    assert_eq!(first.len(), 2);
    assert_eq!(first[1].category, Some(ApplicantCategory::StartUp));
}

#[test]
fn blank_applicant_names_are_skipped_but_do_not_end_the_list() {
    let fields = FormFields::new()
        .with("applicants[0][name]", "")
        .with("applicants[1][name]", "Second");

    let applicants = decode_applicants(&fields);
    assert_eq!(applicants.len(), 1);
    assert_eq!(applicants[0].name, "Second");
}

#[test]
fn blank_inventors_are_kept() {
    let fields = FormFields::new()
        .with("inventors[0][name]", "")
        .with("inventors[1][name]", "Second");

    assert_eq!(decode_inventors(&fields).len(), 2);
}

#[test]
fn unknown_or_missing_categories_default_to_others() {
    let fields = FormFields::new()
        .with("applicants[0][name]", "Acme")
        .with("applicants[0][category]", "Conglomerate")
        .with("applicants[1][name]", "Bolt");

    let categories: Vec<_> = decode_applicants(&fields)
        .into_iter()
        .map(|applicant| applicant.category)
        .collect();
    assert_eq!(
        categories,
        vec![Some(ApplicantCategory::Others), Some(ApplicantCategory::Others)]
    );
}

#[test]
fn state_is_read_only_for_indian_residents() {
    let fields = FormFields::new()
        .with("inventors[0][name]", "Resident")
        .with("inventors[0][residency]", "India")
        .with("inventors[0][state]", "Kerala")
        .with("inventors[1][name]", "Abroad")
        .with("inventors[1][residency]", "Germany")
        .with("inventors[1][state]", "Bavaria");

    let inventors = decode_inventors(&fields);
    assert_eq!(inventors[0].state, "Kerala");
    assert_eq!(inventors[1].state, "");
    assert_eq!(inventors[0].category, None);
}

#[test]
fn agents_need_a_number_or_a_name() {
    let fields = FormFields::new()
        .with("agents[0][inpaNo]", "")
        .with("agents[0][name]", "")
        .with("agents[1][inpaNo]", "")
        .with("agents[1][name]", "Named Only")
        .with("agents[2][inpaNo]", "IN/PA-9")
        .with("agents[3][name]", "No discriminator key");

    let agents = decode_agents(&fields);
    assert_eq!(agents.len(), 2);
    assert_eq!(agents[0].name, "Named Only");
    assert_eq!(agents[1].inpa_no, "IN/PA-9");
    assert_eq!(agents[1].mobile, "");
}

#[test]
fn service_address_reads_nested_fields() {
    let address = decode_service_address(&filing_form().with("serviceAddress[fax]", "080-1234"));
    assert_eq!(address.name, "Menon & Co");
    assert_eq!(address.fax, "080-1234");
    assert_eq!(address.telephone, "");
}
