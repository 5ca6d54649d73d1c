/// Fixed instruction sent with every image. Changing the row schema means
/// changing this text.
pub const EXTRACTION_PROMPT: &str = concat!(
    "You are a data extraction assistant. Extract ALL product entries from this ",
    "Quality Control Pre-Dispatched Product Report image.\n\n",
    "For EACH product row in the table extract:\n",
    "- variety: product name + weight (e.g. \"Rolled Oats 800gm\")\n",
    "- batch_code\n",
    "- mfg_date\n",
    "- expiry_date\n",
    "- mrp (number only)\n",
    "- defects_status (Yes or No)\n",
    "- total_dispatch_ctn (number)\n",
    "- party_name (if visible)\n\n",
    "Return ONLY a raw JSON array. No markdown, no backticks, no extra text. Example:\n",
    "[{\"variety\":\"Rolled Oats 800gm\",\"batch_code\":\"AK19K26R800D\",\"mfg_date\":\"26-11-2025\",",
    "\"expiry_date\":\"25-11-2026\",\"mrp\":\"405\",\"defects_status\":\"No\",\"total_dispatch_ctn\":\"5\",",
    "\"party_name\":\"Dautal Trading\"}]\n\n",
    "Use empty string \"\" for any field not visible.",
);
