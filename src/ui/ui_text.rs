use std::sync::LazyLock;

pub struct UiText {
    // --- Tabs ---
    pub tab_price: String,
    pub tab_watchlist: String,
    pub tab_converter: String,
    pub tab_ranking: String,
    pub tab_download: String,
    pub tab_chart: String,

    // --- Shared inputs ---
    pub label_asset_id: String,
    pub label_currency: String,
    pub label_period: String,
    pub hint_asset_id: String,

    // --- Price tab ---
    pub price_button: String,
    pub price_results: String,
    pub price_label: String,
    pub price_change_label: String,
    pub price_volume_label: String,
    pub price_updated_label: String,

    // --- Watchlist tab ---
    pub wl_refresh: String,
    pub wl_add_label: String,
    pub wl_add_button: String,
    pub wl_remove_button: String,

    // --- Converter tab ---
    pub conv_amount: String,
    pub conv_from: String,
    pub conv_to: String,
    pub conv_button: String,
    pub conv_result: String,

    // --- Ranking tab ---
    pub rank_top_n: String,
    pub rank_button: String,

    // --- Download tab ---
    pub dl_days: String,
    pub dl_format: String,
    pub dl_button: String,
    pub dl_save_title: String,
    pub dl_save_path: String,
    pub dl_save: String,
    pub dl_cancel: String,

    // --- Chart tab ---
    pub chart_button: String,
    pub chart_x_axis: String,

    // --- Notices ---
    pub notice_ok: String,
    pub error_input_title: String,
}

pub static UI_TEXT: LazyLock<UiText> = LazyLock::new(|| UiText {
    tab_price: "Price".to_string(),
    tab_watchlist: "Watchlist".to_string(),
    tab_converter: "Converter".to_string(),
    tab_ranking: "Market Cap Ranking".to_string(),
    tab_download: "Download History".to_string(),
    tab_chart: "Chart".to_string(),

    label_asset_id: "Asset ID (e.g. bitcoin):".to_string(),
    label_currency: "Currency:".to_string(),
    label_period: "Period (days):".to_string(),
    hint_asset_id: "bitcoin".to_string(),

    price_button: "Show Price".to_string(),
    price_results: "Results".to_string(),
    price_label: "Price".to_string(),
    price_change_label: "24h Change".to_string(),
    price_volume_label: "24h Volume".to_string(),
    price_updated_label: "Last Updated".to_string(),

    wl_refresh: "Refresh Watchlist".to_string(),
    wl_add_label: "Add asset ID:".to_string(),
    wl_add_button: "Add".to_string(),
    wl_remove_button: "Remove Selected".to_string(),

    conv_amount: "Amount:".to_string(),
    conv_from: "From (asset ID):".to_string(),
    conv_to: "To (currency):".to_string(),
    conv_button: "Convert".to_string(),
    conv_result: "Result".to_string(),

    rank_top_n: "Show top:".to_string(),
    rank_button: "Load Ranking".to_string(),

    dl_days: "Days of history:".to_string(),
    dl_format: "File format:".to_string(),
    dl_button: "Download and Save".to_string(),
    dl_save_title: "Save historical data".to_string(),
    dl_save_path: "Save as:".to_string(),
    dl_save: "Save".to_string(),
    dl_cancel: "Cancel".to_string(),

    chart_button: "Show Chart".to_string(),
    chart_x_axis: "Date".to_string(),

    notice_ok: "OK".to_string(),
    error_input_title: "Input Error".to_string(),
});
