use chrono::NaiveDate;

use super::common::*;
use crate::workflows::filing::context::{checkbox, ApplicationContext};
use crate::workflows::filing::domain::ApplicantCategory;
use crate::workflows::filing::form::FormFields;
use crate::workflows::filing::intake::IntakeGuard;
use crate::workflows::filing::rules::{FilingRules, NOT_ELIGIBLE_REASON};

fn filing_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 3, 7).expect("valid date")
}

fn context_for(fields: &FormFields) -> ApplicationContext {
    let request = IntakeGuard::new()
        .request_from_form(fields)
        .expect("valid form");
    let assessment = FilingRules::standard().assess(&request);
    ApplicationContext::build(&request, &assessment, filing_date())
}

#[test]
fn context_carries_assessment_and_flags() {
    let context = context_for(&filing_form());

    assert_eq!(context.application_type, "Complete");
    assert_eq!(context.date, "07/03/2025");
    assert_eq!(context.main_applicant_category, ApplicantCategory::NaturalPerson);
    assert!(context.is_expedited_allowed);
    assert_eq!(context.expedited_reason, "");
    assert_eq!(context.total_fee, context.fees.total_fee());
    assert_eq!(context.total_fee, 1600 + 2500 + 4000);

    let flags = context.selected;
    assert!(flags.type_complete && !flags.type_provisional);
    assert!(flags.category_natural);
    assert!(!flags.category_others && !flags.category_small);
    assert!(flags.inventors_same_yes && !flags.inventors_same_no);
    assert!(flags.previous_provisional_no);
    assert!(flags.publication_early && !flags.publication_ordinary);
    assert!(flags.examination_ordinary);
}

#[test]
fn missing_second_agent_stands_in_as_empty_record() {
    let context = context_for(&filing_form());
    assert_eq!(context.agent1.inpa_no, "IN/PA-1234");
    assert_eq!(context.agent2.name, "");
}

#[test]
fn every_template_key_is_present_when_blank() {
    let fields = filing_form().with("applicants[0][gender]", "Male");
    let context = context_for(&fields);
    let value = serde_json::to_value(&context).expect("context serializes");

    for key in [
        "application_type",
        "title",
        "date",
        "previous_provisional",
        "provisional_number",
        "inventor",
        "applicant",
        "main_applicant_category",
        "is_expedited_allowed",
        "expedited_reason",
        "agent1",
        "agent2",
        "fees",
        "total_fee",
        "selected",
        "convention",
        "pct",
        "divisional",
        "addition",
        "service_address",
    ] {
        assert!(value.get(key).is_some(), "missing context key {key}");
    }

    assert_eq!(value["main_applicant_category"], "Natural Person");
    assert_eq!(value["expedited_reason"], NOT_ELIGIBLE_REASON);
    assert_eq!(value["convention"]["ipc"], "");
    assert_eq!(value["agent2"]["email"], "");
    assert_eq!(value["inventor"]["category"], "");
    assert_eq!(value["fees"]["total_fee"], value["total_fee"]);
}

#[test]
fn checkbox_glyphs() {
    assert_eq!(checkbox(true), '☑');
    assert_eq!(checkbox(false), '☐');
}
