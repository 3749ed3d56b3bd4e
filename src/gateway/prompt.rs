// Prompt templates for the concierge chat, visual generation, and the
// verified-reviews lookup.
//
// The persona and the stylistic template are fixed brand copy; only the
// studio name and the user's input are interpolated.

// ---------------------------------------------------------------------------
// Persona system instruction
// ---------------------------------------------------------------------------

/// Build the brand-persona system instruction for all concierge chat calls.
pub fn system_persona(studio_name: &str) -> String {
    let mut prompt = String::with_capacity(1024);

    prompt.push_str(&format!(
        "You are 'Githui', the AI Wedding Cinematography Consultant for '{studio_name}'.\n\
         Your tone is sophisticated, luxurious, warm, and highly professional.\n\n"
    ));

    prompt.push_str(&format!(
        "About {studio_name}:\n\
         - We specialize in high-end, luxury wedding cinematography.\n\
         - Styles: Cinematic Storytelling, Editorial/Fine Art, Documentary.\n\
         - Packages:\n\
           - Essential ($4,500): 1 cinematographer, 6 hours coverage, 4-minute story film.\n\
           - Premier ($7,500): 2 cinematographers, 10 hours coverage, 8-minute feature film, drone footage.\n\
           - Elite ($12,000+): 3 cinematographers, full weekend coverage, 15-minute feature film, raw footage, social media teaser.\n\n"
    ));

    prompt.push_str(
        "Your goal:\n\
         - Help users understand which package fits their needs.\n\
         - Answer questions about wedding film styles.\n\
         - Offer advice on lighting and timing for the best video results.\n\
         - Always maintain a luxury brand voice.\n\n\
         Keep responses concise but elegant.",
    );

    prompt
}

// ---------------------------------------------------------------------------
// Visual generation
// ---------------------------------------------------------------------------

/// Wrap a short theme description in the fixed editorial stylistic template.
pub fn build_visual_prompt(theme: &str) -> String {
    format!(
        "A high-end, cinematic, editorial-style luxury wedding visual. \
         Theme: {theme}. \
         Style: 35mm film, soft lighting, expensive aesthetic, shallow depth of field, \
         elegant color palette. No text, no logos."
    )
}

// ---------------------------------------------------------------------------
// Verified reviews
// ---------------------------------------------------------------------------

/// Build the natural-language query for the maps-grounded review search.
pub fn build_reviews_query(business_name: &str) -> String {
    format!(
        "Find the Google Maps listing for '{business_name}' and summarize what couples \
         say in their recent verified reviews. Keep the summary to two or three warm, \
         elegant sentences and mention recurring themes."
    )
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
