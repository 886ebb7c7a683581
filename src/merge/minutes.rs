use super::policy::{folded, is_truthy_number, merge_block, prefer_text, replace_if, union_by_key};
use super::Merge;
use crate::models::{Governance, MinutesData, Resolutions};

fn has_name(name: &Option<String>) -> bool {
    name.as_deref().is_some_and(|n| !n.is_empty())
}

impl Merge for MinutesData {
    fn merge(self, incoming: Self) -> Self {
        MinutesData {
            governance: merge_block(self.governance, incoming.governance, merge_governance),
            // The fee block moves as a unit: a later minutes document with an
            // actual amount supersedes the whole block.
            fee: replace_if(incoming.fee, self.fee, |f| f.fee_amount.is_some_and(is_truthy_number)),
            resolutions: merge_block(self.resolutions, incoming.resolutions, merge_resolutions),
        }
    }
}

fn merge_governance(e: Governance, i: Governance) -> Governance {
    let council = union_by_key(e.council, i.council, |m| folded(m.name.as_deref()));
    Governance {
        management_period: prefer_text(i.management_period, e.management_period),
        syndic: replace_if(i.syndic, e.syndic, |s| has_name(&s.name)),
        vice_syndic: replace_if(i.vice_syndic, e.vice_syndic, |s| has_name(&s.name)),
        council: Some(council),
    }
}

fn merge_resolutions(e: Resolutions, i: Resolutions) -> Resolutions {
    Resolutions {
        ordinary_summary: prefer_text(i.ordinary_summary, e.ordinary_summary),
        extraordinary_summary: prefer_text(i.extraordinary_summary, e.extraordinary_summary),
    }
}
