use core::fmt;
use hal_interface::SerialTransport;

/// Console output formatting directives.
///
/// This enum describes how a given string or character should be emitted to the
/// console, including whether to surround it with newlines.
pub enum ConsoleFormatting<'a> {
    /// No formatting is done.
    StrNoFormatting(&'a str),
    /// New line is added after write.
    StrNewLineAfter(&'a str),
    /// New line is added before write.
    StrNewLineBefore(&'a str),
    /// New lines are added before and after write.
    StrNewLineBoth(&'a str),
    /// Only adds a new line.
    Newline,
    /// Writes a single character.
    Char(char),
}

/// Text console on top of an initialized serial transport.
///
/// Every line feed goes out as a CR LF pair so that plain terminal emulators
/// return to the first column.
pub struct ConsoleOutput<'a, S: SerialTransport> {
    serial: &'a mut S,
}

impl<'a, S: SerialTransport> ConsoleOutput<'a, S> {
    /// Creates a console writing to `p_serial`.
    ///
    /// The transport must already be initialized; bytes written to a transport
    /// that is not ready are lost.
    pub fn new(p_serial: &'a mut S) -> Self {
        ConsoleOutput { serial: p_serial }
    }

    /// Writes text according to the requested formatting.
    pub fn write(&mut self, p_format: &ConsoleFormatting) {
        match p_format {
            ConsoleFormatting::StrNoFormatting(l_str) => self.write_str(l_str),
            ConsoleFormatting::StrNewLineAfter(l_str) => {
                self.write_str(l_str);
                self.new_line();
            }
            ConsoleFormatting::StrNewLineBefore(l_str) => {
                self.new_line();
                self.write_str(l_str);
            }
            ConsoleFormatting::StrNewLineBoth(l_str) => {
                self.new_line();
                self.write_str(l_str);
                self.new_line();
            }
            ConsoleFormatting::Newline => self.new_line(),
            ConsoleFormatting::Char(l_char) => self.write_char(*l_char),
        }
    }

    /// Writes `p_text` followed by a line terminator.
    pub fn write_line(&mut self, p_text: &str) {
        self.write(&ConsoleFormatting::StrNewLineAfter(p_text));
    }

    #[inline(always)]
    fn new_line(&mut self) {
        self.serial.write_bytes(b"\r\n");
    }

    fn write_char(&mut self, p_char: char) {
        let mut l_buf = [0u8; 4];
        self.write_str(p_char.encode_utf8(&mut l_buf));
    }

    fn write_str(&mut self, p_str: &str) {
        for l_byte in p_str.bytes() {
            if l_byte == b'\n' {
                self.new_line();
            } else {
                self.serial.write_byte(l_byte);
            }
        }
    }
}

impl<S: SerialTransport> fmt::Write for ConsoleOutput<'_, S> {
    fn write_str(&mut self, p_str: &str) -> fmt::Result {
        ConsoleOutput::write_str(self, p_str);
        Ok(())
    }
}
