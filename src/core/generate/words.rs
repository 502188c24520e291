//! Word list for passphrases.

/// Short, common English words.
pub const WORDS: &[&str] = &[
    "able", "acid", "aged", "also", "arch", "area", "army", "away", "baby", "back", "bake",
    "ball", "band", "bank", "barn", "base", "bath", "bean", "bear", "beat", "bell", "belt",
    "bench", "bird", "bite", "blade", "blue", "boat", "body", "bold", "bolt", "bone", "book",
    "boot", "bowl", "brave", "bread", "brick", "bridge", "brown", "brush", "bunch", "cabin",
    "cable", "cake", "calm", "camel", "camp", "candle", "canoe", "card", "care", "cargo",
    "carpet", "cart", "castle", "cedar", "chair", "chalk", "cheese", "cherry", "chess", "chief",
    "chin", "cider", "city", "clay", "cliff", "clock", "cloud", "coal", "coast", "coat",
    "cobra", "comet", "coral", "corn", "cotton", "couch", "crane", "creek", "crisp", "crow",
    "crown", "cube", "cup", "dance", "dawn", "deer", "desk", "dial", "dice", "dime", "dock",
    "dog", "dove", "dragon", "drum", "duck", "dune", "eagle", "earth", "echo", "eight", "elbow",
    "elm", "ember", "engine", "fable", "face", "farm", "feast", "fern", "field", "fig", "film",
    "fire", "fish", "flag", "flame", "flint", "flock", "flute", "foam", "fog", "forest", "fork",
    "fox", "frost", "fruit", "gale", "garden", "gate", "gem", "ghost", "giant", "gift",
    "ginger", "glass", "globe", "glove", "goat", "gold", "goose", "grain", "grape", "grass",
    "gravel", "gull", "hammer", "harbor", "harp", "hat", "hawk", "hazel", "heart", "hedge",
    "helmet", "hero", "hill", "honey", "hook", "horn", "horse", "house", "ice", "igloo", "inch",
    "ink", "iron", "island", "ivory", "ivy", "jacket", "jade", "jam", "jar", "jelly", "jewel",
    "judge", "juice", "jungle", "kayak", "kettle", "key", "kite", "knee", "knot", "ladder",
    "lake", "lamp", "lane", "lark", "lava", "lawn", "leaf", "lemon", "lens", "lily", "lime",
    "linen", "lion", "lizard", "lock", "lodge", "lotus", "lunar", "magnet", "mango", "maple",
    "marble", "market", "mask", "meadow", "melon", "metal", "mint", "mirror", "moon", "moose",
    "moss", "moth", "mule", "nail", "navy", "nest", "nickel", "noble", "north", "nut", "oak",
    "oasis", "ocean", "olive", "onion", "opal", "orbit", "otter", "oven", "owl", "paddle",
    "palm", "panda", "paper", "parrot", "pasta", "peach", "pear", "pebble", "pencil", "pepper",
    "piano", "pilot", "pine", "pipe", "planet", "plum", "pond", "poppy", "port", "potato",
    "prism", "pulse", "pump", "quail", "quartz", "quill", "rabbit", "radar", "rain", "ranch",
    "raven", "reef", "ridge", "ring", "river", "road", "robin", "rocket", "roof", "rope",
    "rose", "ruby", "saddle", "sail", "salmon", "salt", "sand", "scarf", "seal", "seed",
    "shadow", "shark", "sheep", "shell", "ship", "silk", "silver", "skate", "sky", "sled",
    "slope", "smoke", "snail", "snow", "sock", "sofa", "solar", "spark", "spice", "spoon",
    "spring", "spruce", "square", "stable", "star", "steam", "stone", "storm", "straw",
    "stream", "sugar", "summit", "sun", "swan", "table", "tail", "tango", "tea", "tent",
    "thorn", "tiger", "timber", "toast", "tomato", "torch", "tower", "trail", "train", "tree",
    "tulip", "tunnel", "turtle", "umbrella", "valley", "velvet", "violet", "violin", "wagon",
    "walnut", "water", "wave", "whale", "wheat", "wheel", "willow", "wind", "window", "wolf",
    "wool", "yacht", "yarn", "zebra", "zinc",
];
