//! Default value functions used by serde for config deserialization.

pub fn default_owner_name() -> String {
    "Nathalja".to_string()
}

pub fn default_data_dir() -> String {
    "~/.folio".to_string()
}

pub fn default_log_level() -> String {
    "info".to_string()
}

pub fn default_true() -> bool {
    true
}

pub fn default_storage_key() -> String {
    "preferredLanguage".to_string()
}

pub fn default_query_param() -> String {
    "lang".to_string()
}

pub fn default_whatsapp_number() -> String {
    "31657591440".to_string()
}

pub fn default_email() -> String {
    "nathaljanijman@hotmail.com".to_string()
}

pub fn default_linkedin() -> String {
    "linkedin.com/in/nathalja-nijman-86410389".to_string()
}

pub fn default_reply_delay_min_ms() -> u64 {
    1500
}

pub fn default_reply_delay_max_ms() -> u64 {
    2500
}

pub fn default_scroll_throttle_ms() -> u64 {
    16
}

pub fn default_resize_debounce_ms() -> u64 {
    150
}

pub fn default_scroll_threshold_px() -> u32 {
    50
}
