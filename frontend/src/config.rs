// Store credentials are baked in at build time, e.g.
// `SUPABASE_URL=... SUPABASE_ANON_KEY=... trunk build --release`.

pub fn supabase_url() -> &'static str {
    option_env!("SUPABASE_URL").unwrap_or("")
}

pub fn supabase_anon_key() -> &'static str {
    option_env!("SUPABASE_ANON_KEY").unwrap_or("")
}

pub fn warn_if_unconfigured() {
    if supabase_url().is_empty() || supabase_anon_key().is_empty() {
        log::warn!("Supabase credentials not found. Build with SUPABASE_URL and SUPABASE_ANON_KEY set.");
    }
}
