//! Fixed phrases the assistant speaks

pub const GREETING: &str = "Hello, welcome to our Indian restaurant! How may I assist you today?";
pub const COMMAND_HINT: &str = "You can say 'order', 'menu', or 'reservation'.";
pub const FALLBACK: &str = "Sorry, I didn't understand. You can say 'order', 'menu', or 'exit'.";
pub const RESERVATION_STUB: &str = "Reservation feature coming soon!";
pub const FAREWELL: &str = "Goodbye! Have a great day!";

pub const ASK_PREFERENCE: &str = "Would you like vegetarian or non-vegetarian dishes?";
pub const CLARIFY_PREFERENCE: &str = "I didn't understand. Please say veg or non-veg.";
pub const PREFERENCE_GIVE_UP: &str = "Let's look at the menu another time.";
pub const OFFER_ORDER: &str = "Would you like to place an order?";

pub const ASK_ORDER: &str = "What would you like to order?";
pub const ORDER_NOT_UNDERSTOOD: &str =
    "Sorry, I didn't understand the order. Could you please repeat it?";

pub const ASK_SPICE: &str = "Would you like extra spice or less spice?";
pub const ASK_DOSA_TEXTURE: &str = "Do you want extra crispy or soft dosa?";
pub const ASK_BUTTER: &str = "Would you like extra butter or plain?";
pub const ASK_MODIFICATIONS: &str = "Any modifications to your order?";
