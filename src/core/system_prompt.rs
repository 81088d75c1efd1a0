// src/core/system_prompt.rs — Fixed instruction and few-shot exchanges for color picking

use crate::provider::Message;

/// Instruction describing the hue/saturation/lightness heuristics and the output format.
pub const SYSTEM_PROMPT: &str = "You are a system that processes any input text and outputs a hex color code. \n\n\
Think carefully about the user's text. Picture in your mind imagery depicting what the user has written. \
Consider the most dominant aspect of the imagery. Output it. Consider the hue associated with this.\n\n\
Consider hue the most, it is important. \n\
A good starting point for saturation would be 40-60%\n\
Saturation should be boosted (70-90%) for bright, energetic, or happy imagery.\n\
Saturation at 20% and below is mostly greyscale, which is fine if the imagery is grey.\n\
Try not to use #00000 or #ffffff, those are quite boring colors - pick something else close.\n\n\
Always output in this format\n\n\
Imagery:\n\
Hue: [value] (reasoning)\n\
Saturation: [value] (reasoning)\n\
Lightness: [value] (reasoning)\n\
#8b705b (hex value)";

/// (user input, assistant answer) pairs shown to the model before the real input.
pub const FEW_SHOT_EXAMPLES: &[(&str, &str)] = &[
    (
        "a mountain brook",
        "Imagery: A serene mountain brook, with clear water flowing over rocks, surrounded by lush greenery.\n\
Hue: 160 (The dominant aspect is the natural, fresh greenery around the brook.)\n\
Saturation: 50% (The scene is calm and natural, not overly vibrant.)\n\
Lightness: 50% (Balanced lightness to reflect the natural setting without being too dark or too bright.)\n\
#4c8c64",
    ),
    (
        "a peach",
        "Imagery: A ripe, juicy peach with a soft, fuzzy skin and a warm, inviting color.\n\
Hue: 30 (A warm, orange hue to capture the essence of a ripe peach.)\n\
Saturation: 70% (A vibrant saturation to reflect the bright and appealing nature of the fruit.)\n\
Lightness: 60% (A lighter tone to convey the freshness and juiciness of the peach.)\n\
#f5a15f",
    ),
    (
        "glow in the dark",
        "Imagery: The soft, eerie luminescence of objects that glow in the dark, often with a greenish tint.\n\
Hue: 120 (A green hue to represent the typical glow-in-the-dark color.)\n\
Saturation: 60% (Moderate saturation to reflect the distinct yet soft glow.)\n\
Lightness: 70% (A lighter tone to emphasize the glow against darkness.)\n\
#9be89b",
    ),
];

/// Build the message sequence sent to the model.
///
/// Order: system instruction, few-shot exchanges, prior history (only when
/// `keep_history`), then the new input as the final user turn.
pub fn build_messages(input_text: &str, history: &[Message], keep_history: bool) -> Vec<Message> {
    let history_len = if keep_history { history.len() } else { 0 };
    let mut messages = Vec::with_capacity(1 + FEW_SHOT_EXAMPLES.len() * 2 + history_len + 1);

    messages.push(Message::system(SYSTEM_PROMPT));
    for (user, assistant) in FEW_SHOT_EXAMPLES {
        messages.push(Message::user(*user));
        messages.push(Message::assistant(*assistant));
    }
    if keep_history {
        messages.extend(history.iter().cloned());
    }
    messages.push(Message::user(input_text));

    messages
}
