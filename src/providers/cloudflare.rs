//! Import identifier rules for the `cloudflare/cloudflare` provider.
//!
//! Zone-scoped resources import as `<zone_id>/<id>`. Rulesets live either on a
//! zone or on an account and carry that scope in their identifier.

use super::Condition::Present;
use super::Part::{Attr, Lit};
use super::{FormatRule, Template, rule};

pub static RULES: &[FormatRule] = &[
    rule!("cloudflare_zone" => Attr("id")),
    rule!("cloudflare_dns_record" => Attr("zone_id"), Lit("/"), Attr("id")),
    // Provider v4 name of cloudflare_dns_record.
    rule!("cloudflare_record" => Attr("zone_id"), Lit("/"), Attr("id")),
    rule!("cloudflare_page_rule" => Attr("zone_id"), Lit("/"), Attr("id")),
    rule!("cloudflare_workers_script" => Attr("account_id"), Lit("/"), Attr("script_name")),
    FormatRule {
        resource_type: "cloudflare_ruleset",
        templates: &[
            Template {
                when: Present("zone_id"),
                parts: &[Lit("zones/"), Attr("zone_id"), Lit("/"), Attr("id")],
            },
            Template {
                when: Present("account_id"),
                parts: &[Lit("accounts/"), Attr("account_id"), Lit("/"), Attr("id")],
            },
        ],
    },
];
