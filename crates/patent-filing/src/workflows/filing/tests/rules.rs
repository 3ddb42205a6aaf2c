use std::collections::BTreeMap;

use super::common::*;
use crate::workflows::filing::domain::{
    ApplicantCategory, ApplicationType, ExaminationPreference, PublicationPreference, SheetCounts,
};
use crate::workflows::filing::fees::{FeeCalculator, FeeInputs, FeeSchedule};
use crate::workflows::filing::rules::{
    CategoryPriority, ExpeditedPolicy, FilingRules, NOT_ELIGIBLE_REASON, NO_APPLICANTS_REASON,
};

fn complete_inputs(category: ApplicantCategory) -> FeeInputs {
    FeeInputs {
        application_type: ApplicationType::Complete,
        publication: PublicationPreference::Ordinary,
        examination: ExaminationPreference::Ordinary,
        category,
        sheet_counts: SheetCounts::default(),
        claim_count: 0,
    }
}

fn sheets(total: u32) -> SheetCounts {
    SheetCounts {
        patent_document: total.saturating_sub(3),
        abstract_sheets: 1,
        claims: 1,
        drawings: 1,
    }
}

#[test]
fn excess_sheet_fee_starts_after_thirty_sheets() {
    let schedule = FeeSchedule::standard();
    let calculator = FeeCalculator::new(&schedule);

    for (total, expected) in [(30, 0), (31, 160), (45, 2400)] {
        let breakdown = calculator.calculate(&FeeInputs {
            sheet_counts: sheets(total),
            ..complete_inputs(ApplicantCategory::Others)
        });
        assert_eq!(breakdown.excess_sheet_fee(), expected, "{total} sheets");
    }
}

#[test]
fn excess_claim_fee_starts_after_ten_claims() {
    let schedule = FeeSchedule::standard();
    let calculator = FeeCalculator::new(&schedule);

    for (claims, expected) in [(10, 0), (11, 800), (20, 8000)] {
        let breakdown = calculator.calculate(&FeeInputs {
            claim_count: claims,
            ..complete_inputs(ApplicantCategory::Others)
        });
        assert_eq!(breakdown.excess_claim_fee(), expected, "{claims} claims");
    }
}

#[test]
fn provisional_filings_never_pay_publication_or_examination() {
    let schedule = FeeSchedule::standard();
    let calculator = FeeCalculator::new(&schedule);

    for category in ApplicantCategory::ALL {
        let breakdown = calculator.calculate(&FeeInputs {
            application_type: ApplicationType::Provisional,
            publication: PublicationPreference::Early,
            examination: ExaminationPreference::Expedited,
            ..complete_inputs(category)
        });
        assert_eq!(breakdown.publication_fee(), 0);
        assert_eq!(breakdown.examination_fee(), 0);
        assert_eq!(
            breakdown.filing_fee(),
            schedule.fees_for(category).filing_fee
        );
    }
}

#[test]
fn natural_person_early_publication_costs_2500() {
    let schedule = FeeSchedule::standard();
    let calculator = FeeCalculator::new(&schedule);

    let early = calculator.calculate(&FeeInputs {
        publication: PublicationPreference::Early,
        ..complete_inputs(ApplicantCategory::NaturalPerson)
    });
    let ordinary = calculator.calculate(&complete_inputs(ApplicantCategory::NaturalPerson));

    assert_eq!(early.publication_fee(), 2500);
    assert_eq!(ordinary.publication_fee(), 0);
}

#[test]
fn totals_always_match_components() {
    let schedule = FeeSchedule::standard();
    let calculator = FeeCalculator::new(&schedule);

    for category in ApplicantCategory::ALL {
        for application_type in [ApplicationType::Provisional, ApplicationType::Complete] {
            let breakdown = calculator.calculate(&FeeInputs {
                application_type,
                publication: PublicationPreference::Early,
                sheet_counts: sheets(52),
                claim_count: 17,
                ..complete_inputs(category)
            });
            assert_eq!(
                breakdown.total_fee(),
                breakdown.filing_fee()
                    + breakdown.publication_fee()
                    + breakdown.examination_fee()
                    + breakdown.excess_sheet_fee()
                    + breakdown.excess_claim_fee()
            );
        }
    }
}

#[test]
fn highest_priority_category_wins() {
    let priority = CategoryPriority::standard();
    let applicants = vec![
        applicant(ApplicantCategory::NaturalPerson, "Female"),
        applicant(ApplicantCategory::EducationalInstitution, ""),
        applicant(ApplicantCategory::StartUp, ""),
    ];
    assert_eq!(
        priority.resolve(&applicants),
        ApplicantCategory::EducationalInstitution
    );
    assert_eq!(priority.resolve(&[]), ApplicantCategory::Others);
}

#[test]
fn first_seen_category_wins_ties() {
    let priority = CategoryPriority::new(BTreeMap::from([
        (ApplicantCategory::StartUp, 3),
        (ApplicantCategory::SmallEntity, 3),
    ]));
    let applicants = vec![
        applicant(ApplicantCategory::SmallEntity, ""),
        applicant(ApplicantCategory::StartUp, ""),
    ];
    assert_eq!(priority.resolve(&applicants), ApplicantCategory::SmallEntity);
}

#[test]
fn unranked_and_missing_categories_are_ignored() {
    let priority = CategoryPriority::new(BTreeMap::from([(ApplicantCategory::StartUp, 1)]));
    let mut uncategorised = applicant(ApplicantCategory::Others, "");
    uncategorised.category = None;
    let applicants = vec![
        uncategorised,
        applicant(ApplicantCategory::SmallEntity, ""),
        applicant(ApplicantCategory::StartUp, ""),
    ];
    assert_eq!(priority.resolve(&applicants), ApplicantCategory::StartUp);
}

#[test]
fn resolved_category_is_always_enumerated() {
    let priority = CategoryPriority::standard();
    for first in ApplicantCategory::ALL {
        for second in ApplicantCategory::ALL {
            let resolved = priority.resolve(&[applicant(first, ""), applicant(second, "")]);
            assert!(ApplicantCategory::ALL.contains(&resolved));
            let expected = if priority.rank(second) > priority.rank(first) {
                second
            } else {
                first
            };
            assert_eq!(resolved, expected);
        }
    }
}

#[test]
fn expedited_eligibility_follows_category_and_gender() {
    let policy = ExpeditedPolicy::standard();

    let startup = policy.evaluate(&[applicant(ApplicantCategory::StartUp, "")]);
    assert!(startup.allowed);
    assert_eq!(startup.reason, None);

    let female = policy.evaluate(&[applicant(ApplicantCategory::NaturalPerson, "Female")]);
    assert!(female.allowed);
    assert_eq!(female.reason, None);

    let shouting = policy.evaluate(&[applicant(ApplicantCategory::NaturalPerson, "FEMALE")]);
    assert!(shouting.allowed);

    let male = policy.evaluate(&[applicant(ApplicantCategory::NaturalPerson, "Male")]);
    assert!(!male.allowed);
    assert_eq!(male.reason.as_deref(), Some(NOT_ELIGIBLE_REASON));

    let others_female = policy.evaluate(&[applicant(ApplicantCategory::Others, "Female")]);
    assert!(!others_female.allowed);

    let empty = policy.evaluate(&[]);
    assert!(!empty.allowed);
    assert_eq!(empty.reason.as_deref(), Some(NO_APPLICANTS_REASON));
}

#[test]
fn assessment_uses_resolved_category_for_fees() {
    let rules = FilingRules::standard();
    let mut request = crate::workflows::filing::intake::IntakeGuard::new()
        .request_from_form(&filing_form())
        .expect("valid form");
    request
        .applicants
        .push(applicant(ApplicantCategory::SmallEntity, ""));

    let assessment = rules.assess(&request);
    assert_eq!(
        assessment.main_applicant_category,
        ApplicantCategory::SmallEntity
    );
    assert_eq!(assessment.fees.filing_fee(), 4000);
    assert_eq!(assessment.fees.publication_fee(), 6250);
    assert_eq!(assessment.fees.examination_fee(), 10000);
    assert!(assessment.eligibility.allowed);
}
