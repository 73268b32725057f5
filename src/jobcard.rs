//! Job card generation: the three-line header prepended to every
//! member's JCL before submission.

use crate::model::CandidateJob;

/// Build the job card for a candidate. Deterministic for the same
/// inputs: the member name doubles as job name and programmer name,
/// the account number fills the accounting field, and the third line is
/// a `/*JOBPARM SYSAFF` directive when a system affinity is configured,
/// otherwise a comment placeholder.
pub fn build_card(candidate: &CandidateJob) -> String {
    let affinity = match &candidate.system_affinity {
        Some(ssid) => format!("/*JOBPARM SYSAFF={ssid}"),
        None => "//*".to_string(),
    };
    format!(
        "//{member} JOB ({acct}),'{member}',NOTIFY=&SYSUID,CLASS=A,\n//  MSGCLASS=X\n {affinity}\n",
        member = candidate.member,
        acct = candidate.account_number,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candidate(ssid: Option<&str>) -> CandidateJob {
        CandidateJob::new("HLQ.PROJ.JCL", "PAYROLL", "D1542", ssid.map(str::to_string))
    }

    #[test]
    fn card_without_affinity_uses_comment_placeholder() {
        let card = build_card(&candidate(None));
        assert_eq!(
            card,
            "//PAYROLL JOB (D1542),'PAYROLL',NOTIFY=&SYSUID,CLASS=A,\n//  MSGCLASS=X\n //*\n"
        );
    }

    #[test]
    fn card_with_affinity_emits_jobparm_directive() {
        let card = build_card(&candidate(Some("SYSA")));
        assert!(card.ends_with(" /*JOBPARM SYSAFF=SYSA\n"));
        assert!(card.starts_with("//PAYROLL JOB (D1542),"));
    }

    #[test]
    fn card_is_deterministic() {
        let candidate = candidate(Some("SYSB"));
        assert_eq!(build_card(&candidate), build_card(&candidate));
    }
}
