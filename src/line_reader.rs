use anyhow::Result;
use std::io::BufRead;

pub struct LineReader<'a> {
    reader: &'a mut dyn BufRead,
    line_no: usize,
    line: String,
}

impl<'a> LineReader<'a> {
    pub fn new(reader: &'a mut (dyn BufRead + 'a)) -> Self {
        LineReader::<'a> {
            reader: reader,
            line_no: 0,
            line: String::new(),
        }
    }

    pub fn get_last_line_number(&self) -> usize {
        self.line_no
    }

    pub fn get_last_line(&self) -> &str {
        &self.line
    }

    /// Reads the next line, without its line ending. Returns false at the end of the input.
    pub fn next_line_raw(&mut self) -> Result<bool> {
        self.line.clear();

        match self.reader.read_line(&mut self.line) {
            Ok(0) => Ok(false),
            Ok(_n) => {
                if self.line.ends_with('\n') {
                    self.line.pop();
                    if self.line.ends_with('\r') {
                        self.line.pop();
                    }
                }
                self.line_no += 1;
                Ok(true)
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Reads the next line that is neither empty nor a comment (starting with #). Returns None at the end of the input.
    pub fn next_line(&mut self) -> Result<Option<&str>> {
        loop {
            if !self.next_line_raw()? {
                return Ok(None);
            }
            let trimmed = self.line.trim();
            if !trimmed.is_empty() && !trimmed.starts_with('#') {
                break;
            }
        }
        Ok(Some(self.line.trim()))
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::LineReader;

    #[test]
    fn line_reader_skips_comments() {
        let mut input = Cursor::new("# header\n\n  1 2 = 3\r\n#x\nlast");
        let mut reader = LineReader::new(&mut input);

        assert_eq!(reader.next_line().unwrap(), Some("1 2 = 3"));
        assert_eq!(reader.get_last_line_number(), 3);
        assert_eq!(reader.next_line().unwrap(), Some("last"));
        assert_eq!(reader.get_last_line(), "last");
        assert_eq!(reader.next_line().unwrap(), None);
        assert_eq!(reader.next_line().unwrap(), None);
    }
}
