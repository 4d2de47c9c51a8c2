//! Community testimonials shown in the carousel.

use serde::Serialize;

use crate::recommendations::Accent;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Testimonial {
    pub name: String,
    pub role: String,
    pub quote: String,
    /// Avatar glyph.
    pub avatar: String,
    pub accent: Accent,
}

impl Testimonial {
    fn new(name: &str, role: &str, quote: &str, avatar: &str, accent: Accent) -> Self {
        Self {
            name: name.to_string(),
            role: role.to_string(),
            quote: quote.to_string(),
            avatar: avatar.to_string(),
            accent,
        }
    }
}

/// The built-in testimonial list, in display order.
pub fn builtin_testimonials() -> Vec<Testimonial> {
    vec![
        Testimonial::new(
            "Sarah Martinez",
            "Food Distribution Organizer",
            "I started by volunteering one Saturday morning. Three years later, I've helped organize food distribution for over 500 families. The connections I've made are priceless.",
            "🌻",
            Accent::Navy,
        ),
        Testimonial::new(
            "James Chen",
            "Emergency Support Recipient",
            "When my apartment flooded, I didn't know where to turn. Within hours, the mutual aid network had me in temporary housing and helped me rebuild. They didn't just help—they cared.",
            "🌟",
            Accent::Gold,
        ),
        Testimonial::new(
            "Maria Rodriguez",
            "Community Garden Coordinator",
            "During job loss, mutual aid kept my family fed and housed. Now I coordinate our community garden, growing food for 30 families. We take care of each other.",
            "🌱",
            Accent::Navy,
        ),
        Testimonial::new(
            "David Kim",
            "Volunteer Coordinator",
            "What started as helping with a food drive turned into building a neighborhood support network. We've created something lasting—real community that shows up for each other.",
            "🤝",
            Accent::Gold,
        ),
        Testimonial::new(
            "Lisa Thompson",
            "Disaster Response Lead",
            "During the storms, mutual aid mobilized faster than any official agency. We housed 50 families, distributed supplies, and proved that neighbors helping neighbors works.",
            "💪",
            Accent::Navy,
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_has_five_alternating_accents() {
        let all = builtin_testimonials();
        assert_eq!(all.len(), 5);
        for (i, t) in all.iter().enumerate() {
            let expected = if i % 2 == 0 { Accent::Navy } else { Accent::Gold };
            assert_eq!(t.accent, expected, "{}", t.name);
        }
    }
}
