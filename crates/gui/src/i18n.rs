use std::sync::atomic::{AtomicU8, Ordering};

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Lang {
    #[default]
    Vi,
    En,
}

static CURRENT_LANG: AtomicU8 = AtomicU8::new(0); // 0=Vi (default)

pub fn lang() -> Lang {
    match CURRENT_LANG.load(Ordering::Relaxed) {
        1 => Lang::En,
        _ => Lang::Vi,
    }
}

pub fn set_lang(l: Lang) {
    CURRENT_LANG.store(
        match l {
            Lang::Vi => 0,
            Lang::En => 1,
        },
        Ordering::Relaxed,
    );
}

/// Translate a key to the current language.
pub fn t(key: &str) -> &'static str {
    translate(lang(), key)
}

/// Translate a key to the given language.
pub fn translate(lang: Lang, key: &str) -> &'static str {
    let vi = lang == Lang::Vi;
    match key {
        // ── Main menus ──────────────────────────────────────
        "menu.file" => if vi { "Tệp" } else { "File" },
        "menu.new_session" => if vi { "Bài toán mới  Ctrl+N" } else { "New problem  Ctrl+N" },
        "menu.open" => if vi { "Mở hình..." } else { "Open scene..." },
        "menu.open_title" => if vi { "Mở tệp JSON hình vẽ" } else { "Open Scene JSON" },
        "menu.save" => if vi { "Lưu hình..." } else { "Save scene..." },
        "menu.save_title" => if vi { "Lưu tệp JSON hình vẽ" } else { "Save Scene JSON" },
        "menu.quit" => if vi { "Thoát" } else { "Quit" },

        "menu.edit" => if vi { "Sửa" } else { "Edit" },
        "menu.undo" => if vi { "Hoàn tác  Ctrl+Z" } else { "Undo  Ctrl+Z" },
        "menu.redo" => if vi { "Làm lại  Ctrl+Shift+Z" } else { "Redo  Ctrl+Shift+Z" },
        "menu.erase" => if vi { "Xóa nét vẽ" } else { "Erase drawings" },

        "menu.view" => if vi { "Xem" } else { "View" },
        "menu.sessions" => if vi { "Danh sách bài toán" } else { "Problem list" },
        "menu.chat" => if vi { "Trò chuyện" } else { "Chat" },
        "menu.tutor" => if vi { "Gợi ý và lời giải" } else { "Hints and solution" },
        "menu.reset_view" => if vi { "Đặt lại góc nhìn  Home" } else { "Reset view  Home" },
        "menu.center_view" => if vi { "Căn giữa hình" } else { "Center diagram" },
        "menu.language" => if vi { "Ngôn ngữ" } else { "Language" },

        "menu.settings" => if vi { "Cài đặt" } else { "Settings" },
        "menu.preferences" => if vi { "Tùy chọn..." } else { "Preferences..." },
        "menu.voice" => if vi { "Đọc tên điểm" } else { "Speak point names" },

        // ── Canvas toolbar ──────────────────────────────────
        "tb.zoom_in" => if vi { "Phóng to" } else { "Zoom in" },
        "tb.zoom_out" => if vi { "Thu nhỏ" } else { "Zoom out" },
        "tb.rotate_left" => if vi { "Xoay trái" } else { "Rotate left" },
        "tb.rotate_right" => if vi { "Xoay phải" } else { "Rotate right" },
        "tb.reset" => if vi { "Đặt lại" } else { "Reset" },
        "tb.pan" => if vi { "Kéo hình" } else { "Pan" },
        "tb.draw" => if vi { "Vẽ tay" } else { "Draw" },
        "tb.erase" => if vi { "Xóa nét" } else { "Erase" },
        "tb.color" => if vi { "Màu bút" } else { "Pen color" },

        // ── Canvas ──────────────────────────────────────────
        "canvas.placeholder" => if vi { "Nhập đề bài để bắt đầu" } else { "Enter a problem to start" },
        "canvas.camera" => if vi { "Góc nhìn" } else { "Camera" },
        "canvas.skipped" => if vi { "phần tử bị bỏ qua" } else { "elements skipped" },

        // ── Chat ────────────────────────────────────────────
        "chat.title" => if vi { "Trò chuyện" } else { "Chat" },
        "chat.welcome" => if vi {
            "Chào em! Hãy gửi đề bài hình học (chữ hoặc ảnh), thầy sẽ vẽ hình giúp em."
        } else {
            "Hi! Send me a geometry problem (text or photo) and I will draw it for you."
        },
        "chat.hint" => if vi { "Nhập đề bài..." } else { "Type a problem..." },
        "chat.send" => if vi { "Gửi" } else { "Send" },
        "chat.attach" => if vi { "Ảnh" } else { "Photo" },
        "chat.attach_title" => if vi { "Chọn ảnh đề bài" } else { "Choose a photo of the problem" },
        "chat.attached" => if vi { "Đã đính kèm ảnh" } else { "Photo attached" },
        "chat.remove_image" => if vi { "Bỏ ảnh" } else { "Remove photo" },
        "chat.thinking" => if vi { "Đang vẽ hình..." } else { "Drawing..." },
        "chat.retry" => if vi { "Thử lại" } else { "Retry" },
        "chat.done" => if vi { "Xong!" } else { "Done!" },
        "chat.you" => if vi { "Em" } else { "You" },
        "chat.tutor" => if vi { "Gia sư" } else { "Tutor" },
        "chat.error_credential" => if vi {
            "Máy chủ chưa có khóa API nên thầy chưa vẽ được. Em nhờ người quản trị kiểm tra nhé."
        } else {
            "The server has no API key configured, so I cannot draw yet. Please ask the administrator."
        },
        "chat.error_offline" => if vi {
            "Không kết nối được máy chủ. Em kiểm tra mạng rồi thử lại nhé."
        } else {
            "Could not reach the server. Check the connection and try again."
        },
        "chat.error_generic" => if vi { "Lỗi rồi em ạ." } else { "Something went wrong." },

        // ── Sessions ────────────────────────────────────────
        "session.title" => if vi { "Bài toán" } else { "Problems" },
        "session.default_name" => if vi { "Bài toán" } else { "Problem" },
        "session.new" => if vi { "+ Bài mới" } else { "+ New" },
        "session.delete" => if vi { "Xóa" } else { "Delete" },
        "session.empty" => if vi { "(chưa có hình)" } else { "(no diagram)" },

        // ── Tutor panel ─────────────────────────────────────
        "tutor.hints" => if vi { "Gợi ý" } else { "Hints" },
        "tutor.solution" => if vi { "Lời giải" } else { "Solution" },
        "tutor.steps" => if vi { "Các bước" } else { "Steps" },
        "tutor.show_answer" => if vi { "Xem trả lời" } else { "Show answer" },
        "tutor.no_hints" => if vi { "Chưa có gợi ý." } else { "No hints yet." },
        "tutor.no_solution" => if vi { "Chưa có lời giải." } else { "No solution yet." },
        "tutor.no_steps" => if vi { "Chưa có các bước vẽ." } else { "No drawing steps yet." },
        "tutor.prev" => if vi { "◀ Trước" } else { "◀ Previous" },
        "tutor.next" => if vi { "Sau ▶" } else { "Next ▶" },
        "tutor.step" => if vi { "Bước" } else { "Step" },

        // ── Status bar ──────────────────────────────────────
        "status.no_scene" => if vi { "Chưa có hình" } else { "No diagram" },
        "status.selected" => if vi { "Đang chọn" } else { "Selected" },
        "status.drawing" => if vi { "Chế độ vẽ" } else { "Drawing mode" },
        "status.panning" => if vi { "Chế độ kéo" } else { "Pan mode" },
        "status.zoom" => if vi { "Tỉ lệ" } else { "Scale" },

        // ── Speech ──────────────────────────────────────────
        "speech.point" => if vi { "Điểm" } else { "Point" },

        // ── Settings window ─────────────────────────────────
        "settings.title" => if vi { "Cài đặt" } else { "Settings" },
        "settings.server" => if vi { "Máy chủ" } else { "Server" },
        "settings.server_url" => if vi { "Địa chỉ" } else { "URL" },
        "settings.timeout" => if vi { "Thời gian chờ (giây)" } else { "Timeout (s)" },
        "settings.canvas" => if vi { "Bảng vẽ" } else { "Canvas" },
        "settings.bg_color" => if vi { "Màu nền" } else { "Background color" },
        "settings.camera_info" => if vi { "Hiện thông tin góc nhìn" } else { "Show camera info" },
        "settings.ui" => if vi { "Giao diện" } else { "Interface" },
        "settings.font_size" => if vi { "Cỡ chữ" } else { "Font size" },
        "settings.apply" => if vi { "Áp dụng" } else { "Apply" },
        "settings.reset" => if vi { "Mặc định" } else { "Reset" },
        "settings.close" => if vi { "Đóng" } else { "Close" },

        // ── Fallback ────────────────────────────────────────
        _ => "???",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_both_languages() {
        assert_eq!(translate(Lang::Vi, "chat.done"), "Xong!");
        assert_eq!(translate(Lang::En, "chat.done"), "Done!");
        assert_eq!(translate(Lang::Vi, "speech.point"), "Điểm");
    }

    #[test]
    fn test_unknown_key() {
        assert_eq!(translate(Lang::En, "nope"), "???");
    }

    #[test]
    fn test_lang_wire_names() {
        assert_eq!(serde_json::to_string(&Lang::Vi).unwrap(), r#""vi""#);
        let en: Lang = serde_json::from_str(r#""en""#).unwrap();
        assert_eq!(en, Lang::En);
    }
}
