//! Canned copy for generated posts and comments.

use rand::Rng;

use mastermind_types::Tone;

pub const TITLE_TEMPLATES: [&str; 6] = [
    "How are you putting slide decks together faster these days?",
    "Best AI presentation maker for client work? Honest opinions wanted",
    "PowerPoint vs Canva vs AI tools: what actually works for business decks?",
    "Has anyone found a pitch deck generator that doesn't look generic?",
    "What's your workflow for going from outline to clean slides?",
    "If you could only keep ONE deck tool, which would it be and why?",
];

type BodyTemplate = fn(&[&str]) -> String;

const BODY_TEMPLATES: [BodyTemplate; 3] = [formatting_time_body, standardize_body, tradeoffs_body];

fn formatting_time_body(keywords: &[&str]) -> String {
    format!(
        "I build a lot of decks at work and want to spend less time on formatting.\n\n\
         What I care about:\n- a fast first draft\n- decent design without hours of tweaking\n- easy edits and export\n\n\
         If you've tried {} - what worked and what didn't?\nAny workflows worth copying?",
        keywords.join(" / ")
    )
}

fn standardize_body(keywords: &[&str]) -> String {
    format!(
        "I'm rebuilding my deck workflow and trying to standardize it.\n\n\
         Goal: a \"good enough\" first draft in under 30 minutes, then polish.\n\
         Currently experimenting with {}.\n\n\
         What do you use for structure (the story) vs layout (the design)?",
        keywords.join(", ")
    )
}

fn tradeoffs_body(keywords: &[&str]) -> String {
    format!(
        "I keep switching between PowerPoint/Canva and the newer AI tools.\n\n\
         What I want:\n- clean layouts\n- a consistent theme\n- painless reordering and edits\n\n\
         If you've used {}, what are the real tradeoffs?",
        keywords.join(" / ")
    )
}

/// Render a uniformly chosen body template around `keywords`
pub fn render_body<R: Rng + ?Sized>(keywords: &[&str], rng: &mut R) -> String {
    let template = BODY_TEMPLATES[rng.random_range(0..BODY_TEMPLATES.len())];
    template(keywords)
}

/// The comment a persona of the given tone leaves on a thread
pub fn tone_line(tone: Tone) -> &'static str {
    match tone {
        Tone::Pm => "I'd frame it as story first, then design. What decision is the deck supposed to drive?",
        Tone::Ops => "If speed matters, standardize the structure. A template plus a checklist beats hunting for perfect layouts.",
        Tone::Sales => "For client decks, clarity beats fancy visuals. The narrative should be obvious in 30 seconds.",
        Tone::Consult => "Pick a repeatable structure and stop reinventing slides. Most decks are the same 80/20.",
        Tone::General => "I've tried a few approaches and writing the outline first helps a lot.",
    }
}

pub const CLARIFYING_QUESTION: &str =
    "Quick question: are you optimizing for speed, \"premium\" design, or easy collaboration?";

pub const AUTHOR_REPLY: &str =
    "Good point. Mostly speed plus \"good enough\" design. Happy to polish the last 10-15% by hand, just not spend hours aligning boxes.";
