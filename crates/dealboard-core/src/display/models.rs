//! Display implementations for domain models.
//!
//! Every model renders as Markdown. The plain `Display` impl is the
//! unmasked rendering; wrap a model in [`Masked`](super::Masked) for demo
//! mode.

use std::fmt;

use super::{
    datetime::LocalDateTime,
    mask::{Mask, MaskedDisplay},
};
use crate::models::{Activity, ActivitySubject, Contact, Deal, Stage};

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl fmt::Display for ActivitySubject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.kind(), self.id())
    }
}

impl MaskedDisplay for Deal {
    fn fmt_masked(&self, f: &mut fmt::Formatter<'_>, mask: Mask) -> fmt::Result {
        writeln!(f, "## {} (ID: {})", mask.name(&self.title), self.id)?;
        writeln!(f)?;

        writeln!(f, "- **Stage**: {}", self.stage.label())?;
        writeln!(f, "- **Value**: {}", mask.money(self.value, &self.currency))?;
        writeln!(f, "- **Contact**: {}", self.contact_id)?;
        if let Some(date) = self.expected_close_date {
            writeln!(f, "- **Expected close**: {date}")?;
        }
        if self.follow_up {
            writeln!(f, "- **Follow-up**: yes")?;
        }
        if let Some(author) = &self.created_by {
            writeln!(f, "- **Created by**: {}", mask.text(author))?;
        }
        writeln!(f, "- **Created**: {}", LocalDateTime(&self.created_at))?;

        if let Some(notes) = self.notes.as_deref().filter(|n| !n.trim().is_empty()) {
            writeln!(f)?;
            writeln!(f, "{}", mask.text(notes))?;
        }
        writeln!(f)
    }
}

impl fmt::Display for Deal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.fmt_masked(f, Mask::Off)
    }
}

impl MaskedDisplay for Contact {
    fn fmt_masked(&self, f: &mut fmt::Formatter<'_>, mask: Mask) -> fmt::Result {
        writeln!(f, "## {} (ID: {})", mask.name(&self.name), self.id)?;
        writeln!(f)?;

        let fields = [
            ("Company", Some(self.company.as_str())),
            ("Email", Some(self.email.as_str())),
            ("Phone", Some(self.phone.as_str())),
            ("Met via", self.met_via.as_deref()),
            ("Next step", self.next_step.as_deref()),
            ("Website", self.website.as_deref()),
            ("Social", self.social_url.as_deref()),
        ];
        for (label, value) in fields {
            if let Some(value) = value.filter(|v| !v.trim().is_empty()) {
                writeln!(f, "- **{label}**: {}", mask.text(value))?;
            }
        }
        if let Some(date) = self.next_action_date {
            writeln!(f, "- **Next action**: {date}")?;
        }
        if self.follow_up {
            writeln!(f, "- **Follow-up**: yes")?;
        }
        writeln!(f, "- **Created**: {}", LocalDateTime(&self.created_at))?;

        if !self.notes.trim().is_empty() {
            writeln!(f)?;
            writeln!(f, "{}", mask.text(&self.notes))?;
        }
        writeln!(f)
    }
}

impl fmt::Display for Contact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.fmt_masked(f, Mask::Off)
    }
}

impl MaskedDisplay for Activity {
    fn fmt_masked(&self, f: &mut fmt::Formatter<'_>, mask: Mask) -> fmt::Result {
        write!(f, "- {} ", LocalDateTime(&self.created_at))?;
        if let Some(author) = &self.created_by {
            write!(f, "**{}** ", mask.text(author))?;
        }
        writeln!(f, "(#{}): {}", self.id, mask.text(&self.note))
    }
}

impl fmt::Display for Activity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.fmt_masked(f, Mask::Off)
    }
}
